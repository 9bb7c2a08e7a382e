use std::path::{Path, PathBuf};

/// Name of the temporary file a message's video is downloaded to.
pub fn file_name_for(chat_id: i64, message_id: &str, username: Option<&str>) -> String {
    format!(
        "{}-{}-{}.mp4",
        chat_id,
        message_id,
        username.unwrap_or("unknown")
    )
}

/// Arguments of one `yt-dlp` download invocation.
#[derive(Debug, Clone)]
pub struct DownloadCommand {
    url: String,
    folder: PathBuf,
    file_name: String,
    format_id: Option<String>,
    proxy: Option<String>,
    preset: Option<String>,
}

impl DownloadCommand {
    pub fn new(url: impl Into<String>, folder: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            folder: folder.into(),
            file_name: file_name.into(),
            format_id: None,
            proxy: None,
            preset: None,
        }
    }

    /// `-f ID`
    pub fn format_id(mut self, id: impl Into<String>) -> Self {
        self.format_id = Some(id.into());
        self
    }

    /// `--proxy URL`; empty values are ignored.
    pub fn proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy.filter(|p| !p.is_empty());
        self
    }

    /// `-t PRESET` (e.g. `mp4`)
    pub fn preset(mut self, preset: impl Into<String>) -> Self {
        self.preset = Some(preset.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    pub fn has_proxy(&self) -> bool {
        self.proxy.is_some()
    }

    /// Where yt-dlp writes the file.
    pub fn output_path(&self) -> PathBuf {
        self.folder.join(&self.file_name)
    }

    pub fn args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(10);
        if let Some(proxy) = &self.proxy {
            args.push("--proxy".to_string());
            args.push(proxy.clone());
        }
        if let Some(id) = &self.format_id {
            args.push("-f".to_string());
            args.push(id.clone());
        }
        args.push("-P".to_string());
        args.push(self.folder.to_string_lossy().into_owned());
        args.push("-o".to_string());
        args.push(self.file_name.clone());
        if let Some(preset) = &self.preset {
            args.push("-t".to_string());
            args.push(preset.clone());
        }
        args.push(self.url.clone());
        args
    }
}
