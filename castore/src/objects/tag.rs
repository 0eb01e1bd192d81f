use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::timestamp_parts;
use crate::{proto, B3Digest, ObjectType};

/// An annotated tag, naming an object inside one repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    repository_id: Uuid,
    name: String,
    target: B3Digest,
    target_type: ObjectType,
    tagger: Uuid,
    message: String,
    created_at: DateTime<Utc>,
}

impl Tag {
    pub fn new(
        repository_id: Uuid,
        name: impl Into<String>,
        target: B3Digest,
        target_type: ObjectType,
        tagger: Uuid,
        message: impl Into<String>,
    ) -> Self {
        Self {
            repository_id,
            name: name.into(),
            target,
            target_type,
            tagger,
            message: message.into(),
            created_at: Utc::now(),
        }
    }

    pub fn digest(&self) -> B3Digest {
        proto::Tag::from(self).digest()
    }

    pub fn repository_id(&self) -> &Uuid {
        &self.repository_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &B3Digest {
        &self.target
    }

    pub fn target_type(&self) -> ObjectType {
        self.target_type
    }

    pub fn tagger(&self) -> &Uuid {
        &self.tagger
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn created_at(&self) -> &DateTime<Utc> {
        &self.created_at
    }
}

impl From<&Tag> for proto::Tag {
    fn from(value: &Tag) -> Self {
        let (timestamp_seconds, timestamp_nanos) = timestamp_parts(&value.created_at);
        proto::Tag {
            repository_id: bytes::Bytes::copy_from_slice(value.repository_id.as_bytes()),
            name: value.name.clone(),
            target: value.target.clone().into(),
            target_type: value.target_type.into(),
            tagger: bytes::Bytes::copy_from_slice(value.tagger.as_bytes()),
            message: value.message.clone(),
            timestamp_seconds,
            timestamp_nanos,
        }
    }
}
