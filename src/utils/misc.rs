use mongodb::bson::oid::ObjectId;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::{
    collections::HashMap,
    time::{SystemTime, UNIX_EPOCH},
};

/// Get EPOCH timestamp in seconds
pub fn get_epoch_ts() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(n) => n.as_secs(),
        Err(_) => panic!("SystemTime before UNIX EPOCH!"),
    }
}

/// Deserialize helper for ObjectId field
pub fn deserialize_helper<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let val = Option::<ObjectId>::deserialize(deserializer)?;
    match val {
        None => Ok(None),
        Some(val) => Ok(Some(val.to_hex())),
    }
}

/// replace placeholder variables from the template text
/// placeholders are of patters {{variable}}
pub fn replace_placeholders(s: &str, options: HashMap<String, String>) -> anyhow::Result<String> {
    let re = Regex::new(r"\{\{(\w+)\}\}")?;
    let mut replaced = String::from(s);
    for cap in re.captures_iter(s) {
        let var = &cap[1];
        if let Some(val) = options.get(var) {
            let find = &cap[0];
            let find = find.replace('{', r"\{");
            let find = find.replace('}', r"\}");
            if let Ok(re) = Regex::new(&find) {
                let rs = re.replace_all(&replaced, val.as_str());
                replaced = rs.to_string();
            }
        }
    }

    Ok(replaced)
}
