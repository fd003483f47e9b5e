use std::collections::HashMap;

/// Handle of a node: segment key in the high half, offset in the low half.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Id(u64);

impl Id {
    /// The virtual child: height -1, size 0, never given children.
    pub(crate) const NIL: Self = Self(u64::MAX);

    #[inline(always)]
    pub(crate) fn new(seg: u32, off: u32) -> Self {
        debug_assert!(off < u32::MAX);
        Self((u64::from(seg) << 32) | u64::from(off))
    }

    #[inline(always)]
    pub(crate) fn is_nil(self) -> bool {
        self.0 == u64::MAX
    }

    #[inline(always)]
    pub(crate) fn seg(self) -> u32 {
        (self.0 >> 32) as u32
    }

    #[inline(always)]
    pub(crate) fn off(self) -> usize {
        (self.0 as u32) as usize
    }

    /// Same offset under the new key of its segment, if that segment was rekeyed.
    pub(crate) fn rekeyed(self, keys: &HashMap<u32, u32>) -> Self {
        if self.is_nil() {
            return self;
        }
        match keys.get(&self.seg()) {
            Some(&seg) => Self::new(seg, self.off() as u32),
            None => self,
        }
    }
}

pub(crate) const LEFT: usize = 0;
pub(crate) const RIGHT: usize = 1;

#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) ch: [Id; 2],
    pub(crate) p: Id,
    pub(crate) size: u32,
    pub(crate) height: i32,
}

impl<T> Node<T> {
    pub(crate) fn new(value: T, p: Id) -> Self {
        Self {
            value,
            ch: [Id::NIL, Id::NIL],
            p,
            size: 1,
            height: 0,
        }
    }

    pub(crate) fn rekey(&mut self, keys: &HashMap<u32, u32>) {
        self.ch[LEFT] = self.ch[LEFT].rekeyed(keys);
        self.ch[RIGHT] = self.ch[RIGHT].rekeyed(keys);
        self.p = self.p.rekeyed(keys);
    }
}
