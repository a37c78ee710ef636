//! End-to-end tests live in the `[[test]]` targets of this package; they bind
//! a real listener and drive the server through `products-hr-client`.
