use std::mem;

use circular_buffer::RingBuffer;

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn exercise<const N: usize>(rb: &mut RingBuffer<u64, N>) -> u64 {
    let mut sum = 0;

    for i in 0..2 * N as u64 {
        rb.push_back(i);
    }
    for i in 0..N as u64 {
        rb.push_front(i);
    }
    for i in 0..rb.len() {
        sum += rb.at(i).copied().unwrap_or_default();
    }
    while let Ok(value) = rb.pop_front() {
        sum += value;
        if let Ok(value) = rb.pop_back() {
            sum += value;
        }
    }

    rb.push_back(sum);
    rb.clear();
    sum
}

#[test]
fn no_heap_allocations_after_construction() {
    let mut inline = RingBuffer::<u64, 16>::new_inline();
    let mut heap = RingBuffer::<u64, 1024>::new_heap();

    // Registers every tracing callsite before profiling starts
    let expected_inline = exercise(&mut inline);
    let expected_heap = exercise(&mut heap);

    let _profiler = dhat::Profiler::builder().testing().build();

    dhat::assert_eq!(expected_inline, exercise(&mut inline));
    dhat::assert_eq!(expected_heap, exercise(&mut heap));

    let stats = dhat::HeapStats::get();
    dhat::assert_eq!(stats.total_blocks, 0);
    dhat::assert_eq!(stats.total_bytes, 0);

    let boxed = RingBuffer::<u64, 64>::new_heap();
    let stats = dhat::HeapStats::get();
    dhat::assert_eq!(stats.total_blocks, 1);
    dhat::assert_eq!(stats.total_bytes, mem::size_of::<RingBuffer<u64, 64>>() as u64);
    dhat::assert!(boxed.is_empty());
}
