//! Runs the `yt-dlp` process. Output (stdout + stderr) is logged line by line and collected for parsing.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

use crate::command::DownloadCommand;
use crate::error::{Result, YtDlpError};
use crate::format::{parse_format_line, parse_size_line, VideoFormat};

/// Settings for [`YtDlp`].
#[derive(Debug, Clone)]
pub struct YtDlpSettings {
    /// Executable name or path.
    pub program: String,
    /// Arguments placed before every command (e.g. `--no-warnings`).
    pub extra_args: Vec<String>,
    pub download_dir: PathBuf,
    pub max_file_size_mb: f64,
    pub timeout: Duration,
}

impl Default for YtDlpSettings {
    fn default() -> Self {
        Self {
            program: "yt-dlp".to_string(),
            extra_args: Vec::new(),
            download_dir: PathBuf::from("/tmp/"),
            max_file_size_mb: 50.0,
            timeout: Duration::from_secs(600),
        }
    }
}

/// yt-dlp process runner.
#[derive(Debug, Clone)]
pub struct YtDlp {
    settings: YtDlpSettings,
}

impl YtDlp {
    pub fn new(settings: YtDlpSettings) -> Self {
        Self { settings }
    }

    pub fn download_dir(&self) -> &Path {
        &self.settings.download_dir
    }

    pub fn max_file_size_mb(&self) -> f64 {
        self.settings.max_file_size_mb
    }

    /// True when `size_mb` is strictly above the configured limit.
    pub fn is_file_size_exceeded(&self, size_mb: f64) -> bool {
        size_mb > self.settings.max_file_size_mb
    }

    /// Runs `yt-dlp -F url` and returns every muxed rendition that has a size.
    #[instrument(skip(self))]
    pub async fn list_formats(&self, url: &str) -> Result<Vec<VideoFormat>> {
        let output = self.run(&["-F".to_string(), url.to_string()], false).await?;
        let formats: Vec<VideoFormat> = output.lines().filter_map(parse_format_line).collect();
        debug!(count = formats.len(), "Parsed formats");
        Ok(formats)
    }

    /// Largest size (MiB) listed by `yt-dlp -F url`, video-only streams included.
    #[instrument(skip(self))]
    pub async fn max_video_size(&self, url: &str) -> Result<f64> {
        let output = self.run(&["-F".to_string(), url.to_string()], false).await?;
        output
            .lines()
            .filter_map(parse_size_line)
            .reduce(f64::max)
            .ok_or(YtDlpError::NoSizeInfo)
    }

    /// Downloads according to `command`; returns the path of the written file.
    #[instrument(skip(self, command), fields(url = %command.url(), proxy = command.has_proxy()))]
    pub async fn download(&self, command: &DownloadCommand) -> Result<PathBuf> {
        tokio::fs::create_dir_all(command.folder()).await?;
        info!(args = ?command.args(), "Starting yt-dlp download");

        self.run(&command.args(), true).await?;

        let path = command.output_path();
        if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Err(YtDlpError::MissingOutput(path.display().to_string()));
        }
        info!(path = %path.display(), "Download finished");
        Ok(path)
    }

    /// Removes a downloaded file. A missing file is fine; other failures are only logged.
    pub async fn delete_file(&self, path: &Path) {
        match tokio::fs::remove_file(path).await {
            Ok(()) => debug!(path = %path.display(), "Deleted file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to delete file"),
        }
    }

    /// Runs yt-dlp with `args`; returns stdout followed by stderr.
    ///
    /// Output lines are logged as they arrive: at info when `verbose`, at debug otherwise.
    async fn run(&self, args: &[String], verbose: bool) -> Result<String> {
        let mut cmd = Command::new(&self.settings.program);
        cmd.args(&self.settings.extra_args)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(YtDlpError::NotFound(self.settings.program.clone()))
            }
            Err(e) => return Err(YtDlpError::Spawn(e)),
        };
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| std::io::Error::other("yt-dlp stdout not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| std::io::Error::other("yt-dlp stderr not captured"))?;

        let finished = async {
            let (out, err) = tokio::join!(read_lines(stdout, verbose), read_lines(stderr, verbose));
            let status = child.wait().await?;
            Ok::<_, YtDlpError>((status, out?, err?))
        };
        let (status, mut log, stderr) =
            match tokio::time::timeout(self.settings.timeout, finished).await {
                Err(_) => return Err(YtDlpError::Timeout(self.settings.timeout.as_secs())),
                Ok(result) => result?,
            };
        log.push_str(&stderr);

        if !status.success() {
            return Err(YtDlpError::Exit {
                code: status.code(),
                log,
            });
        }
        Ok(log)
    }
}

/// Reads `reader` to the end line by line, logging each line; returns everything read.
async fn read_lines<R: AsyncRead + Unpin>(reader: R, verbose: bool) -> std::io::Result<String> {
    let mut reader = BufReader::new(reader);
    let mut collected = String::new();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let raw = String::from_utf8_lossy(&buf);
        let line = raw.trim_end_matches(['\r', '\n']);
        if verbose {
            info!(line = %line, "yt-dlp");
        } else {
            debug!(line = %line, "yt-dlp");
        }
        collected.push_str(line);
        collected.push('\n');
    }
    Ok(collected)
}
