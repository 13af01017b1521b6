//! Ways the CLI hands an order link to the host.

use async_trait::async_trait;
use spice_commerce::checkout::LinkOpener;
use spice_commerce::CommerceError;
use tokio::process::Command;

/// Accepts the link without opening it; the order command prints it.
pub struct PrintOpener;

#[async_trait]
impl LinkOpener for PrintOpener {
    async fn open(&self, uri: &str) -> Result<(), CommerceError> {
        tracing::debug!(length = uri.len(), "order link ready to print");
        Ok(())
    }
}

/// Opens the link with the platform URL handler.
pub struct SystemOpener;

#[async_trait]
impl LinkOpener for SystemOpener {
    async fn open(&self, uri: &str) -> Result<(), CommerceError> {
        let (program, args) = launcher();
        tracing::debug!(program, "opening order link");

        let status = Command::new(program)
            .args(args)
            .arg(uri)
            .status()
            .await
            .map_err(|e| CommerceError::DispatchFailed(format!("could not run {}: {}", program, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(CommerceError::DispatchFailed(format!(
                "{} exited with {}",
                program, status
            )))
        }
    }
}

#[cfg(target_os = "macos")]
fn launcher() -> (&'static str, &'static [&'static str]) {
    ("open", &[])
}

// `cmd /C start` would split the link at `&`.
#[cfg(target_os = "windows")]
fn launcher() -> (&'static str, &'static [&'static str]) {
    ("rundll32", &["url.dll,FileProtocolHandler"])
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn launcher() -> (&'static str, &'static [&'static str]) {
    ("xdg-open", &[])
}
