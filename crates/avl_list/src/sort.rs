use crate::list::AvlTreeList;

const INSERTION_THRESHOLD: usize = 16;

impl<T: Ord + Clone> AvlTreeList<T> {
    /// Returns a new list with the elements in ascending order (stable).
    pub fn sort(&self) -> Self {
        let mut values = self.to_array();
        merge_sort(&mut values);
        Self::from_vec(values)
    }
}

/// Top-down merge sort alternating between `data` and a scratch copy.
pub(crate) fn merge_sort<T: Ord + Clone>(data: &mut [T]) {
    let len = data.len();
    if len < 2 {
        return;
    }
    let mut buf = data.to_vec();
    merge_sort_recursive(&mut buf, data, 0, len);
}

fn merge_sort_recursive<T: Ord + Clone>(src: &mut [T], dst: &mut [T], left: usize, right: usize) {
    let len = right - left;
    if len <= INSERTION_THRESHOLD {
        dst[left..right].clone_from_slice(&src[left..right]);
        insertion_sort(&mut dst[left..right]);
        return;
    }

    let mid = left + (len >> 1);

    merge_sort_recursive(dst, src, left, mid);
    merge_sort_recursive(dst, src, mid, right);

    if src[mid - 1] <= src[mid] {
        dst[left..right].clone_from_slice(&src[left..right]);
        return;
    }

    merge_ranges(src, dst, left, mid, right);
}

fn insertion_sort<T: Ord>(data: &mut [T]) {
    for i in 1..data.len() {
        let mut j = i;
        while j > 0 && data[j - 1] > data[j] {
            data.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn merge_ranges<T: Ord + Clone>(src: &[T], dst: &mut [T], left: usize, mid: usize, right: usize) {
    let mut i = left;
    let mut j = mid;
    let mut k = left;

    while i < mid && j < right {
        if src[i] <= src[j] {
            dst[k] = src[i].clone();
            i += 1;
        } else {
            dst[k] = src[j].clone();
            j += 1;
        }
        k += 1;
    }

    if i < mid {
        dst[k..k + (mid - i)].clone_from_slice(&src[i..mid]);
    } else if j < right {
        dst[k..k + (right - j)].clone_from_slice(&src[j..right]);
    }
}
