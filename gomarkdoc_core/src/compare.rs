use std::io;
use std::io::Read;

use sha2::Digest;
use sha2::Sha256;

/// Check whether two streams hold identical content.
///
/// Each stream is fed through its own SHA-256 hasher so neither has to be
/// held in memory. Equal digests are taken as equal content.
pub fn streams_equal<A: Read, B: Read>(mut first: A, mut second: B) -> io::Result<bool> {
	Ok(digest(&mut first)? == digest(&mut second)?)
}

fn digest<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
	let mut hasher = Sha256::new();
	io::copy(reader, &mut hasher)?;
	Ok(hasher.finalize().to_vec())
}
