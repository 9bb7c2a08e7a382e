//! Tests for [`ytdlp::YtDlp`] against a fake yt-dlp: a shell script run through `sh`.
#![cfg(unix)]

use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tempfile::TempDir;
use ytdlp::{DownloadCommand, YtDlp, YtDlpError, YtDlpSettings};

const FORMATS: &str = include_str!("fixtures/youtube_formats.txt");

/// Writes `body` as a script and returns settings that run it via `sh`.
fn fake_ytdlp(dir: &TempDir, body: &str) -> YtDlpSettings {
    let script = dir.path().join("fake-yt-dlp.sh");
    std::fs::write(&script, body).unwrap();
    YtDlpSettings {
        program: "sh".to_string(),
        extra_args: vec![script.to_string_lossy().into_owned()],
        download_dir: dir.path().join("downloads"),
        max_file_size_mb: 50.0,
        timeout: Duration::from_secs(10),
    }
}

fn cat_formats_script(dir: &TempDir) -> String {
    let table = dir.path().join("formats.txt");
    std::fs::write(&table, FORMATS).unwrap();
    format!("cat '{}'\n", table.display())
}

/// Script that writes a file to `-P DIR` / `-o NAME` like yt-dlp does.
const DOWNLOAD_SCRIPT: &str = r#"
dir=""
name=""
while [ $# -gt 0 ]; do
  case "$1" in
    -P) dir="$2"; shift 2 ;;
    -o) name="$2"; shift 2 ;;
    *) shift ;;
  esac
done
echo "[download] Destination: $dir/$name"
printf 'video-bytes' > "$dir/$name"
"#;

#[tokio::test]
async fn test_list_formats_parses_output() {
    let dir = TempDir::new().unwrap();
    let script = cat_formats_script(&dir);
    let ytdlp = YtDlp::new(fake_ytdlp(&dir, &script));

    let formats = ytdlp.list_formats("https://youtu.be/x").await.unwrap();

    assert_eq!(formats.len(), 1);
    assert_eq!(formats[0].id, "18");
}

#[tokio::test]
async fn test_max_video_size_uses_largest_row() {
    let dir = TempDir::new().unwrap();
    let script = cat_formats_script(&dir);
    let ytdlp = YtDlp::new(fake_ytdlp(&dir, &script));

    let size = ytdlp.max_video_size("https://instagram.com/reel/x").await.unwrap();

    assert_eq!(size, 27.79);
}

#[tokio::test]
async fn test_max_video_size_without_sizes() {
    let dir = TempDir::new().unwrap();
    let ytdlp = YtDlp::new(fake_ytdlp(&dir, "echo '[instagram] nothing here'\n"));

    let err = ytdlp.max_video_size("u").await.unwrap_err();

    assert!(matches!(err, YtDlpError::NoSizeInfo));
}

/// **Test: a non-zero exit becomes YtDlpError::Exit with code and captured output.**
#[tokio::test]
async fn test_non_zero_exit() {
    let dir = TempDir::new().unwrap();
    let ytdlp = YtDlp::new(fake_ytdlp(
        &dir,
        "echo 'ERROR: Unsupported URL' >&2\nexit 2\n",
    ));

    let err = ytdlp.list_formats("https://example.com").await.unwrap_err();

    match err {
        YtDlpError::Exit { code, log } => {
            assert_eq!(code, Some(2));
            assert!(log.contains("Unsupported URL"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_download_writes_file() {
    let dir = TempDir::new().unwrap();
    let ytdlp = YtDlp::new(fake_ytdlp(&dir, DOWNLOAD_SCRIPT));
    let command = DownloadCommand::new("https://youtu.be/x", ytdlp.download_dir(), "1-2-bob.mp4")
        .format_id("18");

    let path = ytdlp.download(&command).await.unwrap();

    assert_eq!(path, dir.path().join("downloads").join("1-2-bob.mp4"));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "video-bytes");

    ytdlp.delete_file(&path).await;
    assert!(!path.exists());
    // second delete of a missing file is a no-op
    ytdlp.delete_file(&path).await;
}

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// **Test: download progress lines are logged at info while yt-dlp runs.**
///
/// **Setup:** subscriber capped at INFO; fake yt-dlp prints a progress line and writes the file.
/// **Expected:** the progress line appears in the captured log.
#[tokio::test]
async fn test_download_logs_progress_at_info() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let dir = TempDir::new().unwrap();
    let script = format!("echo '[download]  42.0% of 3.00MiB'\n{}", DOWNLOAD_SCRIPT);
    let ytdlp = YtDlp::new(fake_ytdlp(&dir, &script));
    let command = DownloadCommand::new("u", ytdlp.download_dir(), "progress.mp4");

    ytdlp.download(&command).await.unwrap();

    let captured = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(captured.contains("42.0% of 3.00MiB"), "log was: {captured}");
    assert!(captured.contains("Destination:"));
}

#[tokio::test]
async fn test_download_missing_output() {
    let dir = TempDir::new().unwrap();
    let ytdlp = YtDlp::new(fake_ytdlp(&dir, "echo 'done, but wrote nothing'\n"));
    let command = DownloadCommand::new("u", ytdlp.download_dir(), "missing.mp4");

    let err = ytdlp.download(&command).await.unwrap_err();

    assert!(matches!(err, YtDlpError::MissingOutput(_)));
}

#[tokio::test]
async fn test_timeout_kills_process() {
    let dir = TempDir::new().unwrap();
    let mut settings = fake_ytdlp(&dir, "sleep 5\n");
    settings.timeout = Duration::from_millis(200);
    let ytdlp = YtDlp::new(settings);

    let err = ytdlp.list_formats("u").await.unwrap_err();

    assert!(matches!(err, YtDlpError::Timeout(_)));
}

#[tokio::test]
async fn test_missing_program() {
    let ytdlp = YtDlp::new(YtDlpSettings {
        program: "definitely-not-a-real-yt-dlp-binary".to_string(),
        ..YtDlpSettings::default()
    });

    let err = ytdlp.list_formats("u").await.unwrap_err();

    assert!(matches!(err, YtDlpError::NotFound(_)));
}

#[test]
fn test_size_limit_is_strict() {
    let ytdlp = YtDlp::new(YtDlpSettings::default());
    assert!(!ytdlp.is_file_size_exceeded(50.0));
    assert!(ytdlp.is_file_size_exceeded(50.01));
    assert_eq!(ytdlp.max_file_size_mb(), 50.0);
    assert_eq!(ytdlp.download_dir(), Path::new("/tmp/"));
}
