/// One transcript entry. Immutable once created.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item<K> {
    id: K,
    author_id: String,
    body: String,
    timestamp_ms: u64,
}

impl<K> Item<K> {
    pub fn new(
        id: K,
        author_id: impl Into<String>,
        body: impl Into<String>,
        timestamp_ms: u64,
    ) -> Self {
        Self {
            id,
            author_id: author_id.into(),
            body: body.into(),
            timestamp_ms,
        }
    }

    pub fn id(&self) -> &K {
        &self.id
    }

    pub fn author_id(&self) -> &str {
        &self.author_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp_ms(&self) -> u64 {
        self.timestamp_ms
    }
}
