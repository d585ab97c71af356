use crate::report::ReportPayload;

pub fn generate_json_string(payload: &ReportPayload) -> serde_json::Result<String> {
    serde_json::to_string_pretty(payload)
}
