use crate::models::AppData;

/// Text key/value store the ledger and goal tracker operate on.
pub trait KeyValueStore {
    fn read_text(&self, key: &str) -> Option<String>;
    fn write_text(&mut self, key: &str, text: &str);
    fn delete_key(&mut self, key: &str);
    fn list_keys(&self) -> Vec<String>;
}

impl KeyValueStore for AppData {
    fn read_text(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write_text(&mut self, key: &str, text: &str) {
        self.entries.insert(key.to_string(), text.to_string());
    }

    fn delete_key(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn list_keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Parses a stored decimal, rejecting blanks and non-finite values.
pub fn parse_decimal(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}
