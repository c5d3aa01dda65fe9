use ark_ec::short_weierstrass::{Affine, Projective, SWCurveConfig};
use ark_ff::{AdditiveGroup, Field};
use ark_std::{fmt, Zero};

/// Bucket accumulator in extended Jacobian (`XYZZ`) coordinates:
/// `x = X / ZZ`, `y = Y / ZZZ`, with `ZZ^3 = ZZZ^2`.
///
/// See <https://hyperelliptic.org/EFD/g1p/auto-shortw-xyzz.html>.
pub struct ExtendedJacobian<P: SWCurveConfig> {
    pub x: P::BaseField,
    pub y: P::BaseField,
    pub zz: P::BaseField,
    pub zzz: P::BaseField,
}

impl<P: SWCurveConfig> Clone for ExtendedJacobian<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: SWCurveConfig> Copy for ExtendedJacobian<P> {}

impl<P: SWCurveConfig> fmt::Debug for ExtendedJacobian<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedJacobian")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("zz", &self.zz)
            .field("zzz", &self.zzz)
            .finish()
    }
}

impl<P: SWCurveConfig> Default for ExtendedJacobian<P> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<P: SWCurveConfig> ExtendedJacobian<P> {
    #[inline]
    pub fn identity() -> Self {
        Self {
            x: P::BaseField::ONE,
            y: P::BaseField::ONE,
            zz: P::BaseField::ZERO,
            zzz: P::BaseField::ZERO,
        }
    }

    #[inline(always)]
    pub fn is_identity(&self) -> bool {
        self.zz.is_zero()
    }

    #[inline]
    pub fn set_identity(&mut self) {
        *self = Self::identity();
    }

    /// `self += point`
    #[inline]
    pub fn add_mixed(&mut self, point: &Affine<P>) {
        if point.infinity {
            return;
        }
        self.add_mixed_coordinates(&point.x, &point.y);
    }

    /// `self -= point`
    #[inline]
    pub fn sub_mixed(&mut self, point: &Affine<P>) {
        if point.infinity {
            return;
        }
        let neg_y = -point.y;
        self.add_mixed_coordinates(&point.x, &neg_y);
    }

    // madd-2008-s
    fn add_mixed_coordinates(&mut self, x2: &P::BaseField, y2: &P::BaseField) {
        if self.is_identity() {
            self.x = *x2;
            self.y = *y2;
            self.zz = P::BaseField::ONE;
            self.zzz = P::BaseField::ONE;
            return;
        }

        // P = U2 - X1, R = S2 - Y1
        let mut p = *x2 * &self.zz;
        p -= &self.x;
        let mut r = *y2 * &self.zzz;
        r -= &self.y;

        if p.is_zero() {
            if r.is_zero() {
                self.double_mixed(x2, y2);
            } else {
                self.set_identity();
            }
            return;
        }

        let pp = p.square();
        let ppp = p * &pp;
        let q = self.x * &pp;

        let mut x3 = r.square();
        x3 -= &ppp;
        x3 -= &q.double();

        let mut y3 = q - &x3;
        y3 *= &r;
        y3 -= &(self.y * &ppp);

        self.x = x3;
        self.y = y3;
        self.zz *= &pp;
        self.zzz *= &ppp;
    }

    // mdbl-2008-s-1
    fn double_mixed(&mut self, x: &P::BaseField, y: &P::BaseField) {
        let u = y.double();
        let v = u.square();
        let w = u * &v;
        let s = *x * &v;

        let xx = x.square();
        let mut m = xx.double();
        m += &xx;
        m += &P::COEFF_A;

        let mut x3 = m.square();
        x3 -= &s.double();

        let mut y3 = s - &x3;
        y3 *= &m;
        y3 -= &(w * y);

        self.x = x3;
        self.y = y3;
        self.zz = v;
        self.zzz = w;
    }

    /// Converts to Jacobian coordinates without an inversion:
    /// `(X * ZZ^2, Y * ZZZ^2, ZZZ)`.
    #[inline]
    pub fn into_jacobian(&self) -> Projective<P> {
        if self.is_identity() {
            return Projective::zero();
        }
        let x = self.x * &self.zz.square();
        let y = self.y * &self.zzz.square();
        Projective::new_unchecked(x, y, self.zzz)
    }
}
