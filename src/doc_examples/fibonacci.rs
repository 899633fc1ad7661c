use ::thread_gen::prelude::*;

fn main ()
{
    let mut fib = Coroutine::new(|yielder| {
        let (mut a, mut b) = (1_u64, 1_u64);
        for _ in 0 .. 5 {
            yielder.yield_(a);
            let next = a + b;
            a = b;
            b = next;
        }
    });

    while fib.is_alive() {
        println!("{}", fib.get().unwrap());
        fib.resume().unwrap();
    }
}
