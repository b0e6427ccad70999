use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("INTRO_WRITER_BASE_URL")
            && !base_url.trim().is_empty()
        {
            self.service.base_url = base_url.trim().to_string();
        }

        if let Ok(draft_path) = std::env::var("INTRO_WRITER_DRAFT_PATH")
            && !draft_path.trim().is_empty()
        {
            self.service.draft_path = draft_path.trim().to_string();
        }

        if let Ok(timeout_str) = std::env::var("INTRO_WRITER_TIMEOUT_SECS")
            && let Ok(timeout) = timeout_str.trim().parse::<u64>()
            && timeout > 0
        {
            self.service.timeout_secs = timeout;
        }

        if let Ok(size_str) = std::env::var("INTRO_WRITER_MAX_FILE_SIZE_MB")
            && let Ok(size) = size_str.trim().parse::<u64>()
        {
            self.attachments.max_file_size_mb = size;
        }
    }
}
