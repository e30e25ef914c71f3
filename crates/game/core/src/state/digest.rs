//! State digests for replay verification.

use sha2::{Digest, Sha256};

use super::RunState;

impl RunState {
    /// SHA-256 over the bincode encoding of the whole state.
    ///
    /// Two runs replayed from the same seed and command sequence produce
    /// the same digest; any divergence in state changes it.
    pub fn digest(&self) -> Result<[u8; 32], bincode::Error> {
        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}
