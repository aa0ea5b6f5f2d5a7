//! Set operations.

use super::{decode, owned, require_non_empty, Client};
use crate::error::Result;
use crate::key_type::KeyType;
use crate::reply;
use crate::store::Command;

impl Client {
    /// Number of members newly added; members already present don't count.
    pub async fn set_add(&self, key: &str, members: &[&str]) -> Result<u64> {
        require_non_empty(members, "members")?;
        self.set_count(Command::SAdd(key.to_string(), owned(members)))
            .await
    }

    /// Number of members actually removed.
    pub async fn set_remove(&self, key: &str, members: &[&str]) -> Result<u64> {
        require_non_empty(members, "members")?;
        self.set_count(Command::SRem(key.to_string(), owned(members)))
            .await
    }

    /// Empty when the key is absent.
    pub async fn set_members(&self, key: &str) -> Result<Vec<String>> {
        self.set_sequence(Command::SMembers(key.to_string())).await
    }

    pub async fn set_is_member(&self, key: &str, member: &str) -> Result<bool> {
        let cmd = Command::SIsMember(key.to_string(), member.to_string());
        let raw = self.guarded_value(&cmd, KeyType::Set).await?;
        decode(&cmd, reply::flag(raw))
    }

    /// Number of members; 0 when the key is absent or is not a set.
    pub async fn set_cardinality(&self, key: &str) -> Result<u64> {
        self.shape_count(&Command::SCard(key.to_string())).await
    }

    /// True iff `member` was in `source` and has been moved to `dest`.
    pub async fn set_move(&self, source: &str, dest: &str, member: &str) -> Result<bool> {
        let cmd = Command::SMove(source.to_string(), dest.to_string(), member.to_string());
        let raw = self.guarded_value(&cmd, KeyType::Set).await?;
        decode(&cmd, reply::flag(raw))
    }

    /// Remove and return a random member.
    pub async fn set_pop(&self, key: &str) -> Result<Option<String>> {
        let cmd = Command::SPop(key.to_string());
        match self.guarded(&cmd, KeyType::Set).await? {
            Some(raw) => decode(&cmd, reply::string(raw)).map(Some),
            None => Ok(None),
        }
    }

    /// `count >= 0`: up to `count` distinct members. `count < 0`: exactly
    /// `|count|` members, possibly repeated.
    pub async fn set_random_sample(&self, key: &str, count: i64) -> Result<Vec<String>> {
        self.set_sequence(Command::SRandMember(key.to_string(), count))
            .await
    }

    pub async fn set_intersect(&self, keys: &[&str]) -> Result<Vec<String>> {
        require_non_empty(keys, "keys")?;
        self.set_sequence(Command::SInter(owned(keys))).await
    }

    /// Store the intersection at `dest`, replacing it; returns its size.
    pub async fn set_intersect_store(&self, dest: &str, keys: &[&str]) -> Result<u64> {
        require_non_empty(keys, "keys")?;
        self.set_count(Command::SInterStore(dest.to_string(), owned(keys)))
            .await
    }

    pub async fn set_union(&self, keys: &[&str]) -> Result<Vec<String>> {
        require_non_empty(keys, "keys")?;
        self.set_sequence(Command::SUnion(owned(keys))).await
    }

    pub async fn set_union_store(&self, dest: &str, keys: &[&str]) -> Result<u64> {
        require_non_empty(keys, "keys")?;
        self.set_count(Command::SUnionStore(dest.to_string(), owned(keys)))
            .await
    }

    /// Members of the first set that are in none of the others.
    pub async fn set_difference(&self, keys: &[&str]) -> Result<Vec<String>> {
        require_non_empty(keys, "keys")?;
        self.set_sequence(Command::SDiff(owned(keys))).await
    }

    pub async fn set_difference_store(&self, dest: &str, keys: &[&str]) -> Result<u64> {
        require_non_empty(keys, "keys")?;
        self.set_count(Command::SDiffStore(dest.to_string(), owned(keys)))
            .await
    }

    async fn set_count(&self, cmd: Command) -> Result<u64> {
        let raw = self.guarded_value(&cmd, KeyType::Set).await?;
        decode(&cmd, reply::count(raw))
    }

    async fn set_sequence(&self, cmd: Command) -> Result<Vec<String>> {
        let raw = self.guarded_value(&cmd, KeyType::Set).await?;
        decode(&cmd, reply::strings(raw))
    }
}
