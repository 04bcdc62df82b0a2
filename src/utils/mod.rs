pub mod kheap;
pub use kheap::KHeap;

pub mod threads;
