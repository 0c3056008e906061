//! Reads an instruction stream from stdin, applies it, and prints the
//! checksum plus elapsed seconds.

use std::io::Read;
use std::process::ExitCode;
use std::time::Instant;

use ordered_buckets::inventory::{self, InventoryMap};

fn main() -> ExitCode {
    let start = Instant::now();

    let mut input = String::new();
    if let Err(err) = std::io::stdin().read_to_string(&mut input) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    // The pool is too large to sit comfortably in a stack frame.
    let mut map = Box::new(InventoryMap::new());
    if let Err(err) = inventory::run(&input, &mut map) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    let sum = inventory::checksum(&map);
    println!("{sum} {:.6}", start.elapsed().as_secs_f64());
    ExitCode::SUCCESS
}
