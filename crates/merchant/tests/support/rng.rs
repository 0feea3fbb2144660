use rand_core::RngCore;

/// Every draw lands on the same point of `[0, 1)`.
pub struct ConstRng {
    bits: u64,
}

impl ConstRng {
    pub fn at(unit: f64) -> Self {
        let mantissa = (unit * (1u64 << 53) as f64) as u64;
        Self {
            bits: mantissa << 11,
        }
    }
}

impl RngCore for ConstRng {
    fn next_u32(&mut self) -> u32 {
        (self.bits >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        self.bits
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        let bytes = self.bits.to_le_bytes();
        for chunk in dst.chunks_mut(8) {
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}
