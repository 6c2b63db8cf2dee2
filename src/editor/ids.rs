use uuid::Uuid;

/// Source of fresh node ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&mut self) -> String;
}

/// Short random ids: the first eight hex digits of a v4 UUID.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn next_id(&mut self) -> String {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(8);
        id
    }
}

/// Predictable ids (`n1`, `n2`, ...) for tests and scripted sessions.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("n")
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
