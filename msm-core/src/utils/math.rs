pub trait Math {
    fn pow2(self) -> usize;
}

impl Math for usize {
    #[inline]
    fn pow2(self) -> usize {
        let base: usize = 2;
        base.pow(self as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pow2() {
        assert_eq!(0usize.pow2(), 1);
        assert_eq!(4usize.pow2(), 16);
        assert_eq!(15usize.pow2(), 32768);
    }
}
