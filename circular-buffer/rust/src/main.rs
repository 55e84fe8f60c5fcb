use circular_buffer::RingBuffer;

fn main() {
    let mut rb = RingBuffer::<usize, 4>::new_inline();

    for i in 1..=5 {
        let overwritten = !rb.push_back(i * 10);
        println!("push_back({}) overwrote: {overwritten}", i * 10);
    }
    println!("push_front(0) overwrote: {}", !rb.push_front(0));

    println!("{rb:?}");

    #[cfg(feature = "dump")]
    {
        let mut out = String::new();
        if rb.dump(&mut out).is_ok() {
            print!("{out}");
        }
    }
}
