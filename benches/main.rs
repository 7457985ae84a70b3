#[macro_use]
extern crate criterion;

mod avltree;
mod btreeset;

criterion_group!(benches, crate::avltree::benchmark, crate::btreeset::benchmark);
criterion_main!(benches);
