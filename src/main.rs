//! artifact_release - wait for CI builds, fetch their artifacts and publish them.

use artifact_release::cli;
use artifact_release::cli::OutputManager;
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    env_logger::init();

    match cli::run().await {
        Ok(exit_code) => {
            process::exit(exit_code);
        }
        Err(e) => {
            // Never quiet for fatal errors
            let output = OutputManager::new(false, false);
            output.error(&format!("Fatal error: {e}"));

            let suggestions = e.recovery_suggestions();
            if !suggestions.is_empty() {
                let _ = output.println("\n💡 Recovery suggestions:");
                for suggestion in suggestions {
                    let _ = output.indent(&format!("• {}", suggestion));
                }
            }

            process::exit(1);
        }
    }
}
