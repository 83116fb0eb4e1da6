//! hourlog main entrypoint.

use hourlog::run;
use hourlog::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
