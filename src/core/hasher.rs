use super::ring::Digest;

/// Maps bytes to a position on the ring.
/// Implementations must be deterministic.
pub trait KeyHasher {
	fn digest(&self, data: &[u8]) -> Digest;
}

/// First 16 bytes of BLAKE3 read as a big-endian integer
#[derive(Clone, Copy, Debug, Default)]
pub struct Blake3Hasher;

impl KeyHasher for Blake3Hasher {
	fn digest(&self, data: &[u8]) -> Digest {
		let hash = blake3::hash(data);
		let mut bytes = [0u8; 16];
		bytes.copy_from_slice(&hash.as_bytes()[..16]);
		Digest::from_be_bytes(bytes)
	}
}

impl<F> KeyHasher for F
where
	F: Fn(&[u8]) -> Digest
{
	fn digest(&self, data: &[u8]) -> Digest {
		self(data)
	}
}
