use game_types::RoundError;

/// Trim a raw nickname from the entry box, rejecting blank input
pub fn normalize_nickname(raw: &str) -> Result<String, RoundError> {
    let nickname = raw.trim();
    if nickname.is_empty() {
        return Err(RoundError::EmptyNickname);
    }

    Ok(nickname.to_string())
}
