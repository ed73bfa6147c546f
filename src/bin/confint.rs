use std::process;

use confint::Analysis;

fn main() {
    if let Err(e) = Analysis::default().configure_from_args().run() {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}
