// --- Default value functions ---

pub(super) fn default_host() -> String {
    "0.0.0.0".to_string()
}
pub(super) fn default_port() -> u16 {
    3000
}
pub(super) fn default_body_limit() -> usize {
    1024 * 1024
}
pub(super) fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
pub(super) fn default_model() -> String {
    "gpt-4o-mini".to_string()
}
pub(super) fn default_timeout_secs() -> u64 {
    20
}
pub(super) fn default_max_retries() -> u32 {
    1
}
pub(super) fn default_coach_name() -> String {
    "Pulso".to_string()
}
pub(super) fn default_training_days() -> u8 {
    3
}
pub(super) fn default_session_minutes() -> u32 {
    45
}
pub(super) fn default_log_level() -> String {
    "info".to_string()
}
