#![allow(non_snake_case)]

// The warm-path operations of the KKT backends (update_scalings,
// update_data, factorize, solve, multiply) must be allocation-free: all
// buffers are sized at construction.  This harness counts every heap
// operation through a wrapping global allocator and fences those calls.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};

use proxip::algebra::*;
use proxip::solver::kktsolvers::direct::{DenseKktSolver, KktMode, SparseKktSolver};
use proxip::solver::kktsolvers::{DataUpdates, KktData, KktSolver};
use proxip::solver::*;

struct CountingAllocator;

static HEAP_OPS: AtomicU64 = AtomicU64::new(0);

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        HEAP_OPS.fetch_add(1, Ordering::SeqCst);
        System.alloc(layout)
    }
    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        HEAP_OPS.fetch_add(1, Ordering::SeqCst);
        System.alloc_zeroed(layout)
    }
    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        HEAP_OPS.fetch_add(1, Ordering::SeqCst);
        System.realloc(ptr, layout, new_size)
    }
    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }
}

#[global_allocator]
static ALLOCATOR: CountingAllocator = CountingAllocator;

fn heap_ops() -> u64 {
    HEAP_OPS.load(Ordering::SeqCst)
}

#[allow(clippy::type_complexity)]
fn fence_test_data() -> (
    CscMatrix<f64>,
    Vec<f64>,
    CscMatrix<f64>,
    Vec<f64>,
    CscMatrix<f64>,
    Vec<f64>,
    Vec<f64>,
    Vec<f64>,
) {
    let P = CscMatrix::new(3, 3, vec![0, 1, 3, 5], vec![0, 0, 1, 1, 2], vec![4., 1., 3., 0.5, 2.]);
    let c = vec![1., -2., 0.5];
    let A = CscMatrix::new(1, 3, vec![0, 1, 2, 2], vec![0, 0], vec![1., 1.]);
    let b = vec![1.];
    let G = CscMatrix::new(2, 3, vec![0, 1, 2, 3], vec![0, 1, 0], vec![1., -1., 2.]);
    let h = vec![2., 2.];
    let x_lb = vec![-1., f64::NEG_INFINITY, -2.];
    let x_ub = vec![1., 2., f64::INFINITY];

    (P, c, A, b, G, h, x_lb, x_ub)
}

fn constant_variables(data: &DefaultProblemData<f64>, v: f64) -> DefaultVariables<f64> {
    let mut vars = DefaultVariables::new(data.n, data.p, data.m, data.n_lb(), data.n_ub());
    vars.s.set(v);
    vars.z.set(v);
    vars.s_lb.set(v);
    vars.z_lb.set(v);
    vars.s_ub.set(v);
    vars.z_ub.set(v);
    vars
}

fn fence_backend(kkt: &mut dyn KktSolver<f64>, data: &DefaultProblemData<f64>) {
    let kktdata = KktData {
        P: &data.P,
        A: &data.A,
        G: &data.G,
    };

    let vars = constant_variables(data, 2.);
    let rhs = constant_variables(data, 1.);
    let mut lhs = constant_variables(data, 0.);
    let mut out = constant_variables(data, 0.);

    // everything above this line may allocate; the fenced region may not
    let before = heap_ops();

    kkt.update_scalings(kktdata, 0.5, 0.25, &vars);
    kkt.update_data(kktdata, DataUpdates::all());
    assert!(kkt.factorize(true));
    kkt.solve(kktdata, &rhs, &mut lhs, true);
    kkt.multiply(kktdata, &lhs, &mut out);

    let after = heap_ops();
    assert_eq!(before, after, "warm-path KKT operation allocated");
}

#[test]
fn test_sparse_backends_allocation_free() {
    let (P, c, A, b, G, h, x_lb, x_ub) = fence_test_data();
    let data = DefaultProblemData::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub);
    let settings = DefaultSettings::default();

    for mode in [
        KktMode::Full,
        KktMode::EqEliminated,
        KktMode::IneqEliminated,
        KktMode::AllEliminated,
    ] {
        let mut kkt = SparseKktSolver::new(
            KktData {
                P: &data.P,
                A: &data.A,
                G: &data.G,
            },
            &data.lb_idx,
            &data.ub_idx,
            mode,
            &settings,
        )
        .unwrap();

        fence_backend(&mut kkt, &data);
    }
}

#[test]
fn test_dense_backend_allocation_free() {
    let (P, c, A, b, G, h, x_lb, x_ub) = fence_test_data();
    let data = DefaultProblemData::new(&P, &c, &A, &b, &G, &h, &x_lb, &x_ub);
    let settings = DefaultSettings::default();

    let mut kkt = DenseKktSolver::new(
        KktData {
            P: &data.P,
            A: &data.A,
            G: &data.G,
        },
        &data.lb_idx,
        &data.ub_idx,
        &settings,
    );

    fence_backend(&mut kkt, &data);
}
