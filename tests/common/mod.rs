#![allow(dead_code)]

pub mod onnx_fixture;
pub mod test_utils;
