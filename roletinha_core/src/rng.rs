use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

// Where the wheel stops is the only random event in the game, so the whole
// randomness surface is this one seam: anything that can hand back a
// position index in [0, wheel_len) can drive a session.

pub type HmacSha256 = Hmac<Sha256>;

/// Source of wheel positions. Implemented by the entropy-backed default,
/// by the provably-fair seeded source, and by any `FnMut(usize) -> usize`
/// (which is how tests force specific outcomes).
pub trait DrawSource {
    /// Next position, uniform in `[0, wheel_len)`.
    fn draw(&mut self, wheel_len: usize) -> usize;
}

impl<F> DrawSource for F
where
    F: FnMut(usize) -> usize,
{
    fn draw(&mut self, wheel_len: usize) -> usize {
        self(wheel_len)
    }
}

/// OS-entropy draws; the default for interactive play.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntropyDraw;

impl DrawSource for EntropyDraw {
    fn draw(&mut self, wheel_len: usize) -> usize {
        rand::thread_rng().gen_range(0..wheel_len)
    }
}

pub fn derive_hash_hex(input: &[u8]) -> String {
    use sha2::Digest;
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

// Map the leading HMAC bytes to a position: 4 bytes -> u32 -> [0,1) -> index.
fn position_from_bytes(bytes: &[u8; 32], wheel_len: usize) -> usize {
    let v = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let f = (v as f64) / (u32::MAX as f64 + 1.0);
    ((f * wheel_len as f64).floor() as usize) % wheel_len
}

fn hmac_bytes(server_seed: &str, client_seed: &str, nonce: u64) -> [u8; 32] {
    let mut mac = HmacSha256::new_from_slice(server_seed.as_bytes()).expect("HMAC key");
    let msg = format!("{}:{}", client_seed, nonce);
    mac.update(msg.as_bytes());
    let res = mac.finalize().into_bytes();
    let mut out = [0u8; 32];
    out.copy_from_slice(&res);
    out
}

/// Position for a given (server_seed, client_seed, nonce) triple.
///
/// server_seed (secret) + client_seed + nonce -> HMAC-SHA256 -> position.
pub fn fair_position(server_seed: &str, client_seed: &str, nonce: u64, wheel_len: usize) -> usize {
    position_from_bytes(&hmac_bytes(server_seed, client_seed, nonce), wheel_len)
}

/// Recompute a recorded draw and check it against the claimed position.
/// The server seed must have been revealed for this to mean anything.
pub fn verify_position(
    server_seed: &str,
    client_seed: &str,
    nonce: u64,
    wheel_len: usize,
    expected: usize,
) -> bool {
    fair_position(server_seed, client_seed, nonce, wheel_len) == expected
}

/// Provably-fair draw source: every spin consumes the next nonce, so a
/// whole session can be replayed and audited from the two seeds.
#[derive(Debug, Clone)]
pub struct FairDraw {
    server_seed: String,
    client_seed: String,
    nonce: u64,
}

impl FairDraw {
    pub fn new(server_seed: impl Into<String>, client_seed: impl Into<String>) -> Self {
        Self::with_nonce(server_seed, client_seed, 0)
    }

    /// Resume a sequence; `nonce` is the last value already consumed.
    pub fn with_nonce(
        server_seed: impl Into<String>,
        client_seed: impl Into<String>,
        nonce: u64,
    ) -> Self {
        Self {
            server_seed: server_seed.into(),
            client_seed: client_seed.into(),
            nonce,
        }
    }

    /// Hash of the secret seed, publishable before any spin as the
    /// commitment players verify against later.
    pub fn server_seed_hash_hex(&self) -> String {
        derive_hash_hex(self.server_seed.as_bytes())
    }

    /// Nonce of the most recent draw (0 before the first).
    pub fn nonce(&self) -> u64 {
        self.nonce
    }
}

impl DrawSource for FairDraw {
    fn draw(&mut self, wheel_len: usize) -> usize {
        self.nonce += 1;
        fair_position(&self.server_seed, &self.client_seed, self.nonce, wheel_len)
    }
}
