//! Outreach portal entrypoint.

use outreach::run;
use outreach::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}
