//! `commhist` - move SMS and call history between a store and text files.

use commhist::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
