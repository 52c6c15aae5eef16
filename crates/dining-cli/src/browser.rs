//! Hand a URL to the platform's default browser.

use anyhow::Context;
use tokio::process::Command;

fn launcher(url: &str) -> Command {
    if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    } else if cfg!(windows) {
        // the empty argument is the window title `start` expects first
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }
}

/// Open `url` with the platform launcher and wait for it to hand off.
pub(crate) async fn open_in_browser(url: &str) -> anyhow::Result<()> {
    tracing::debug!(url, "opening external page");
    let status = launcher(url)
        .status()
        .await
        .with_context(|| format!("failed to launch browser for {url}"))?;

    if !status.success() {
        anyhow::bail!(
            "browser launcher exited with code {:?} for {url}",
            status.code()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launcher_passes_url_as_last_argument() {
        let url = "https://dineoncampus.com/utdallasdining/hours-of-operation";
        let cmd = launcher(url);
        let args: Vec<_> = cmd.as_std().get_args().collect();
        assert_eq!(args.last().and_then(|a| a.to_str()), Some(url));
    }
}
