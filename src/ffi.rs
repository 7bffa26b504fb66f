//! C interface.
//!
//! Every pointer returned by `msssp_graph_new` must be released with
//! `msssp_graph_free`, and every pointer returned by `msssp_compute` with
//! `msssp_result_free`, exactly once.

use crate::algorithm::ShortestPathEngine;
use crate::graph::directed::DirectedGraph;
use crate::graph::MutableGraph;
use libc::size_t;
use log::warn;
use ordered_float::OrderedFloat;

pub struct FfiGraph {
    graph: DirectedGraph<OrderedFloat<f64>>,
}

/// Shortest path result laid out for C callers.
///
/// The predecessors of vertex `v` are
/// `pred_vertices[pred_offsets[v] .. pred_offsets[v + 1]]`;
/// `pred_offsets` holds `len + 1` entries.
#[repr(C)]
pub struct FfiShortestPaths {
    pub distances: *mut f64,
    pub pred_offsets: *mut size_t,
    pub pred_vertices: *mut size_t,
    pub len: size_t,
    pub pred_len: size_t,
    pub source: size_t,
}

/// Returns null if `vertices` cannot be allocated.
#[no_mangle]
pub extern "C" fn msssp_graph_new(vertices: size_t) -> *mut FfiGraph {
    match DirectedGraph::try_with_capacity(vertices) {
        Ok(graph) => Box::into_raw(Box::new(FfiGraph { graph })),
        Err(err) => {
            warn!("msssp_graph_new failed: {}", err);
            std::ptr::null_mut()
        }
    }
}

#[no_mangle]
pub extern "C" fn msssp_graph_add_vertex(g: *mut FfiGraph) -> size_t {
    match unsafe { g.as_mut() } {
        Some(g) => g.graph.add_vertex(),
        None => size_t::MAX,
    }
}

/// Returns false for unknown endpoints and for negative or non-finite weights.
#[no_mangle]
pub extern "C" fn msssp_graph_add_edge(g: *mut FfiGraph, from: size_t, to: size_t, weight: f64) -> bool {
    if !weight.is_finite() {
        return false;
    }
    match unsafe { g.as_mut() } {
        Some(g) => g.graph.add_edge(from, to, OrderedFloat(weight)),
        None => false,
    }
}

#[no_mangle]
pub extern "C" fn msssp_graph_free(g: *mut FfiGraph) {
    if !g.is_null() {
        unsafe {
            drop(Box::from_raw(g));
        }
    }
}

/// Returns null if `g` is null or the computation fails.
#[no_mangle]
pub extern "C" fn msssp_compute(g: *const FfiGraph, source: size_t) -> *mut FfiShortestPaths {
    let graph = match unsafe { g.as_ref() } {
        Some(g) => &g.graph,
        None => return std::ptr::null_mut(),
    };

    let result = match ShortestPathEngine::new().compute(graph, source) {
        Ok(result) => result,
        Err(err) => {
            warn!("msssp_compute failed: {}", err);
            return std::ptr::null_mut();
        }
    };

    let len = result.num_nodes();
    let distances: Box<[f64]> = result.distances().iter().map(|d| d.into_inner()).collect();

    let mut offsets = Vec::with_capacity(len + 1);
    let mut flat = Vec::new();
    offsets.push(0);
    for preds in result.predecessors() {
        flat.extend_from_slice(preds);
        offsets.push(flat.len());
    }
    let pred_len = flat.len();

    Box::into_raw(Box::new(FfiShortestPaths {
        distances: Box::into_raw(distances) as *mut f64,
        pred_offsets: Box::into_raw(offsets.into_boxed_slice()) as *mut size_t,
        pred_vertices: Box::into_raw(flat.into_boxed_slice()) as *mut size_t,
        len,
        pred_len,
        source: result.source(),
    }))
}

#[no_mangle]
pub extern "C" fn msssp_result_free(res: *mut FfiShortestPaths) {
    if res.is_null() {
        return;
    }
    unsafe {
        let res = Box::from_raw(res);
        free_slice(res.distances, res.len);
        free_slice(res.pred_offsets, res.len + 1);
        free_slice(res.pred_vertices, res.pred_len);
    }
}

unsafe fn free_slice<T>(ptr: *mut T, len: usize) {
    if !ptr.is_null() {
        drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, len)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_through_c_interface() {
        let g = msssp_graph_new(3);
        assert!(msssp_graph_add_edge(g, 0, 1, 2.0));
        assert!(msssp_graph_add_edge(g, 0, 2, 2.0));
        assert!(msssp_graph_add_edge(g, 1, 2, 0.0));
        assert!(!msssp_graph_add_edge(g, 0, 9, 1.0));
        assert!(!msssp_graph_add_edge(g, 0, 1, f64::NAN));

        let res = msssp_compute(g, 0);
        assert!(!res.is_null());
        unsafe {
            let r = &*res;
            assert_eq!(r.len, 3);
            assert_eq!(r.source, 0);
            let distances = std::slice::from_raw_parts(r.distances, r.len);
            assert_eq!(distances, &[0.0, 2.0, 2.0]);
            let offsets = std::slice::from_raw_parts(r.pred_offsets, r.len + 1);
            let preds = std::slice::from_raw_parts(r.pred_vertices, r.pred_len);
            let mut of_two = preds[offsets[2]..offsets[3]].to_vec();
            of_two.sort_unstable();
            assert_eq!(of_two, vec![0, 1]);
            assert_eq!(offsets[1] - offsets[0], 0);
        }

        msssp_result_free(res);
        assert!(msssp_compute(g, 7).is_null());
        msssp_graph_free(g);
    }

    #[test]
    fn oversized_graph_returns_null() {
        let g = msssp_graph_new(size_t::MAX);
        assert!(g.is_null());
        assert_eq!(msssp_graph_add_vertex(g), size_t::MAX);
        assert!(msssp_compute(g, 0).is_null());
        msssp_graph_free(g);
    }
}
