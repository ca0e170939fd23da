//! Layout fast-path detection.
//!
//! When every participating view walks its memory uniformly and all views
//! share one order tag, element `e` of view `T` lives at `e * stride(T)` and
//! the kernels skip offset resolution entirely.

use super::descriptor::{Order, ShapeDescriptor};

/// How a kernel addresses the elements of every participating tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// `offset = e * effective_stride`, for every tensor of the call.
    Direct,
    /// Per-element offset resolution from shape and strides.
    Resolved,
}

impl Addressing {
    /// Picks the addressing mode for one call.
    ///
    /// All descriptors are considered together: one irregular view forces
    /// resolved addressing for the whole call.
    pub fn detect(descriptors: &[&ShapeDescriptor]) -> Self {
        let direct = fast_path_eligible(
            descriptors
                .iter()
                .map(|desc| (desc.effective_stride(), desc.order())),
        );

        if direct {
            Addressing::Direct
        } else {
            Addressing::Resolved
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, Addressing::Direct)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Addressing::Direct => "direct",
            Addressing::Resolved => "resolved",
        }
    }
}

/// True iff every effective stride is at least 1 and all order tags agree.
///
/// The same rule applies to every kernel variant, including the triplewise
/// one. Effective strides already follow the row-major walk, so the order
/// check never admits an unsafe set; it only keeps the established rule and
/// may send some uniform layouts down the resolved path.
pub fn fast_path_eligible(layouts: impl IntoIterator<Item = (usize, Order)>) -> bool {
    let mut order = None;

    for (stride, layout_order) in layouts {
        if stride < 1 {
            return false;
        }
        match order {
            None => order = Some(layout_order),
            Some(first) if first != layout_order => return false,
            Some(_) => {}
        }
    }

    true
}
