//! Generic 2D tile iteration.
//!
//! [`tile`] walks a rectangular index space in fixed-size steps, handing each
//! tile origin to a caller-supplied function. Tile dimensions are const
//! generics so the callee can specialize and unroll for them.
//!
//! [`tile_parallel`] dispatches independent row-bands onto the rayon pool and
//! joins before returning; [`tile_parallel_swizzled`] does the same with one
//! task per tile, permuting the task order for last-level-cache reuse. Neither
//! form handles partial tiles: `end_x % TW == 0` and `end_y % TH == 0` are
//! caller obligations.

use rayon::prelude::*;

/// Y-tiles covered by one swizzle group. A group of `GROUP * GROUP_ROWS`
/// consecutive tasks maps onto a `GROUP × GROUP_ROWS` block of tiles.
pub const GROUP_ROWS: usize = 4;

/// Walk `[0, end_x) × [0, end_y)` in `TW × TH` tiles, invoking `f(x, y)` once
/// per tile origin, x fastest.
#[inline]
pub fn tile<const TW: usize, const TH: usize>(
    end_x: usize,
    end_y: usize,
    mut f: impl FnMut(usize, usize),
) {
    debug_assert!(end_x % TW == 0 && end_y % TH == 0);
    let mut y = 0;
    while y < end_y {
        let mut x = 0;
        while x < end_x {
            f(x, y);
            x += TW;
        }
        y += TH;
    }
}

/// Parallel form of [`tile`]: the y axis is split into `end_y / TH` row-bands,
/// each band scanning the full x range sequentially on one worker. Blocks
/// until every band is done.
///
/// Bands never overlap in their `(x, y)` footprint, so callers writing
/// disjoint regions need no locking. No ordering between bands is guaranteed.
pub fn tile_parallel<const TW: usize, const TH: usize>(
    end_x: usize,
    end_y: usize,
    f: impl Fn(usize, usize) + Sync,
) {
    debug_assert!(end_x % TW == 0 && end_y % TH == 0);
    (0..end_y / TH).into_par_iter().for_each(|band| {
        let y = band * TH;
        let mut x = 0;
        while x < end_x {
            f(x, y);
            x += TW;
        }
    });
}

/// Map a linear task id onto swizzled `(x_tile, y_tile)` coordinates.
///
/// Tasks are grouped in runs of `GROUP * GROUP_ROWS`. Within a group, ids
/// interleave across `GROUP` x-tiles before advancing y; group origins advance
/// across the x range and then step down by `GROUP_ROWS`. Concurrent workers
/// therefore share B columns and A rows instead of streaming through one row
/// of tiles each, which is what buys the cache reuse.
///
/// Bijective over the tile grid when `x_tiles % GROUP == 0` and
/// `y_tiles % GROUP_ROWS == 0`; any bijection preserves correctness.
#[inline]
pub fn swizzle<const GROUP: usize>(task: usize, x_tiles: usize) -> (usize, usize) {
    let group_size = GROUP * GROUP_ROWS;
    let group = task / group_size;
    let local = task % group_size;
    let x0 = (group * GROUP) % x_tiles;
    let y0 = (group * GROUP) / x_tiles * GROUP_ROWS;
    (x0 + local % GROUP, y0 + local / GROUP)
}

/// Same contract as [`tile_parallel`], but every tile is its own task and
/// tasks are dispatched in [`swizzle`] order.
///
/// Additional preconditions: `(end_x / TW) % GROUP == 0` and
/// `(end_y / TH) % GROUP_ROWS == 0`.
pub fn tile_parallel_swizzled<const TW: usize, const TH: usize, const GROUP: usize>(
    end_x: usize,
    end_y: usize,
    f: impl Fn(usize, usize) + Sync,
) {
    debug_assert!(end_x % TW == 0 && end_y % TH == 0);
    let x_tiles = end_x / TW;
    let y_tiles = end_y / TH;
    debug_assert!(x_tiles % GROUP == 0 && y_tiles % GROUP_ROWS == 0);
    (0..x_tiles * y_tiles).into_par_iter().for_each(|task| {
        let (tx, ty) = swizzle::<GROUP>(task, x_tiles);
        f(tx * TW, ty * TH);
    });
}
