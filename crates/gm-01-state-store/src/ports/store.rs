use crate::domain::{Hash, MerkleTree, StoreError};

/// Authenticated key/value store.
///
/// `Clone` must produce an isolated snapshot: writes to the clone are
/// invisible to the original and vice versa. The governance engine relies on
/// this for scratch validation and per-transaction rollback.
pub trait KvStore: Clone + Send + Sync {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn set(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), StoreError>;
    fn remove(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn root_hash(&self) -> Hash;
    fn len(&self) -> u64;
    fn count_prefix(&self, prefix: &[u8]) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvStore for MerkleTree {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(MerkleTree::get(self, key).map(<[u8]>::to_vec))
    }

    fn set(&mut self, key: &[u8], value: Vec<u8>) -> Result<(), StoreError> {
        MerkleTree::set(self, key, value);
        Ok(())
    }

    fn remove(&mut self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(MerkleTree::remove(self, key))
    }

    fn root_hash(&self) -> Hash {
        MerkleTree::root_hash(self)
    }

    fn len(&self) -> u64 {
        MerkleTree::len(self)
    }

    fn count_prefix(&self, prefix: &[u8]) -> u64 {
        MerkleTree::count_prefix(self, prefix)
    }
}
