use serde::{Deserialize, Deserializer};

pub const FIRST_PAGE: i64 = 1;

// the game sends whatever is in the address bar, so a page that is not a number means the first one
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(FIRST_PAGE))
}

pub fn first_page() -> i64 {
    FIRST_PAGE
}

// category ids reach the quiz as object keys on the frontend, so "4" and 4 are the same id
pub fn deserialize_lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
    }

    match Id::deserialize(deserializer)? {
        Id::Number(id) => Ok(id),
        Id::Text(value) => value.trim().parse::<i64>().map_err(|_| {
            serde::de::Error::custom(format!("Wrong value {value}, can not parse to i64"))
        }),
    }
}
