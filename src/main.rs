use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match vitalwatch::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "VitalWatch exited with an error");
            eprintln!("vitalwatch: {e}");
            ExitCode::FAILURE
        }
    }
}
