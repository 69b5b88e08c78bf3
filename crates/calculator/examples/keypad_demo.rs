//! Keypad Demo
//!
//! Clicks through a few calculations on the mock DOM UI and runs the
//! unified specifications against both drivers.
//!
//! Run with: cargo run --example keypad_demo

use keypad_calc::driver::{run_full_specification, CalculatorDriver};
use keypad_calc::wasm::CalculatorUi;
use keypad_calc::CalculatorEngine;

fn show(ui: &CalculatorUi) {
    println!("   expression: {:>16}", ui.expression_text());
    println!("   result:     {:>16}", ui.result_text());
}

fn main() {
    println!("Keypad Calculator Demo");
    println!("======================");

    let mut ui = CalculatorUi::new();
    println!("\nKeypad: {} buttons", ui.keypad().button_count());

    println!("\n1. Clicking 1 2 3 4 × 5");
    for id in ["btn-1", "btn-2", "btn-3", "btn-4", "btn-times", "btn-5"] {
        if let Err(e) = ui.click(id) {
            eprintln!("   click {id} failed: {e}");
        }
    }
    show(&ui);

    println!("\n2. Pressing =");
    if let Ok(Some(line)) = ui.press_key("=") {
        println!("   history line: {line}");
    }
    show(&ui);

    println!("\n3. Dividing by zero");
    ui.reset();
    let _ = ui.press_all(&["7", "/", "0", "="]);
    show(&ui);

    println!("\n4. DOM events recorded: {}", ui.dom().event_history().len());

    println!("\n5. Unified specifications");
    let mut engine = CalculatorEngine::new();
    match run_full_specification(&mut engine) {
        Ok(()) => println!("   engine driver: passed"),
        Err(e) => println!("   engine driver: {e}"),
    }
    let mut ui = CalculatorUi::new();
    match run_full_specification(&mut ui) {
        Ok(()) => println!("   ui driver:     passed"),
        Err(e) => println!("   ui driver:     {e}"),
    }
}
