use std::{
    alloc::{GlobalAlloc, Layout, System},
    cell::Cell,
};

use smallany::{LocalSmallAny, SmallAny, StorageOrigin};

thread_local! {
    // Per thread, so tests running in parallel don't see each other's allocations.
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

struct CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let _ = ALLOCATIONS.try_with(|count| count.set(count.get() + 1));
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

/// Runs `f` and returns its result with the number of allocations it made.
fn allocations<R>(f: impl FnOnce() -> R) -> (R, usize) {
    let before = ALLOCATIONS.with(Cell::get);
    let result = f();
    let after = ALLOCATIONS.with(Cell::get);
    (result, after - before)
}

#[derive(Clone, Debug, PartialEq)]
struct IntWrapper(i32);

#[derive(Clone, Debug, PartialEq)]
struct LargeStruct {
    values: [i64; 8],
}

#[test]
fn inline_values_do_not_allocate() {
    let text = String::from("not reallocated");
    let list = vec![1u32, 2, 3];

    let (a, count) = allocations(|| LocalSmallAny::<3>::new(7u32));
    assert_eq!(count, 0);
    assert_eq!(a.origin(), Some(StorageOrigin::Inline));

    let (b, count) = allocations(|| LocalSmallAny::<3>::new(text));
    assert_eq!(count, 0);
    assert_eq!(b.origin(), Some(StorageOrigin::Inline));

    let (c, count) = allocations(|| SmallAny::<3>::new(list));
    assert_eq!(count, 0);
    assert_eq!(c.origin(), Some(StorageOrigin::Inline));

    let (d, count) = allocations(|| a.clone());
    assert_eq!(count, 0);
    assert_eq!(d.downcast_ref::<u32>(), Some(&7));
}

#[test]
fn boxed_values_allocate_once() {
    let (a, count) = allocations(|| LocalSmallAny::<3>::new([1u64; 8]));
    assert_eq!(count, 1);
    assert_eq!(a.origin(), Some(StorageOrigin::Heap));

    let (b, count) = allocations(|| a.clone());
    assert_eq!(count, 1);
    assert_eq!(b.downcast_ref::<[u64; 8]>(), Some(&[1u64; 8]));

    // Larger capacity keeps the same value inline.
    let (c, count) = allocations(|| LocalSmallAny::<8>::new([1usize; 8]));
    assert_eq!(count, 0);
    assert_eq!(c.origin(), Some(StorageOrigin::Inline));
}

#[test]
fn moves_and_swaps_do_not_allocate() {
    let mut inline: LocalSmallAny = LocalSmallAny::new(IntWrapper(1));
    let mut heap: LocalSmallAny = LocalSmallAny::new(LargeStruct { values: [2; 8] });

    let ((), count) = allocations(|| {
        inline.swap(&mut heap);
        inline.swap(&mut heap);
    });
    assert_eq!(count, 0);

    let (moved, count) = allocations(|| heap.take());
    assert_eq!(count, 0);
    assert!(!heap.has_value());
    assert_eq!(moved.cast::<LargeStruct>().unwrap().values, [2; 8]);

    let (value, count) = allocations(|| inline.take_value::<IntWrapper>());
    assert_eq!(count, 0);
    assert_eq!(value, Ok(IntWrapper(1)));
}

#[test]
fn from_box_reuses_allocation() {
    let boxed = Box::new(LargeStruct { values: [3; 8] });

    let (a, count) = allocations(|| LocalSmallAny::<3>::from_box(boxed));
    assert_eq!(count, 0);
    assert_eq!(a.origin(), Some(StorageOrigin::Heap));
}

#[test]
fn emplace_reset_copy_move_scenario() {
    let mut a: LocalSmallAny = LocalSmallAny::empty();

    let ((), count) = allocations(|| {
        a.emplace(IntWrapper(5));
    });
    assert_eq!(count, 0);
    assert_eq!(a.cast::<IntWrapper>(), Ok(IntWrapper(5)));

    a.reset();
    assert!(!a.has_value());

    let ((), count) = allocations(|| {
        a.emplace_with(|| LargeStruct {
            values: [1, 2, 3, 4, 5, 6, 7, 8],
        });
    });
    assert_eq!(count, 1);

    let mut b = a.clone();
    b.cast_mut::<LargeStruct>().unwrap().values[0] = 100;
    assert_eq!(a.cast_ref::<LargeStruct>().unwrap().values[0], 1);
    assert_eq!(b.cast_ref::<LargeStruct>().unwrap().values[0], 100);

    let before = a.cast::<LargeStruct>().unwrap();
    let c = a.take();
    assert_eq!(c.cast_ref::<LargeStruct>(), Ok(&before));
    assert!(!a.has_value());
}
