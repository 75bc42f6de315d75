use serde::{ Serialize, Deserialize };

/// One trained question/answer record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub id: u64,
    pub question: String,
    pub answer: String,
}

/// On-disk document holding every trained pair.
///
/// `last_id` is the highest id ever handed out. It is optional so files written
/// before it existed still load.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingData {
    #[serde(default)]
    pub qa_pairs: Vec<QaPair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_id: Option<u64>,
}

impl TrainingData {
    pub fn next_id(&self) -> u64 {
        let max_existing = self.qa_pairs
            .iter()
            .map(|qa| qa.id)
            .max()
            .unwrap_or(0);
        max_existing.max(self.last_id.unwrap_or(0)) + 1
    }
}
