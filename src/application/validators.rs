use validator::ValidateLength;

const MAX_BUSINESS_ID_LEN: u64 = 128;

/// Validates a directory business id before it is sent to a provider as metadata.
/// Rules:
/// - 1-128 characters after trimming
/// - No whitespace and no `/` (ids are used as path segments by the directory)
pub fn is_valid_business_id(id: &str) -> bool {
    if !id.validate_length(Some(1), Some(MAX_BUSINESS_ID_LEN), None) {
        return false;
    }

    !id.chars().any(|c| c.is_whitespace() || c == '/')
}
