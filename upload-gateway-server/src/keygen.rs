use chrono::Utc;
use rand::RngExt;

const TOKEN_LEN: usize = 13;
const TOKEN_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generates a storage key: epoch-millisecond prefix, random token, then the
/// extension of the client-supplied filename. The time prefix keeps keys
/// sortable by upload time; a same-millisecond collision also requires an
/// identical 13-character draw from a 62-symbol alphabet.
///
/// No existence check is made against the store before the key is used.
pub fn generate_object_key(original_filename: &str) -> String {
    key_at(Utc::now().timestamp_millis(), original_filename)
}

pub(crate) fn key_at(timestamp_millis: i64, original_filename: &str) -> String {
    let token = random_token(TOKEN_LEN);
    match extension(original_filename) {
        Some(ext) => format!("{timestamp_millis}-{token}.{ext}"),
        None => format!("{timestamp_millis}-{token}"),
    }
}

fn random_token(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
        .collect()
}

/// Substring after the last `.`, or `None` when the filename carries no
/// usable extension.
fn extension(filename: &str) -> Option<&str> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}
