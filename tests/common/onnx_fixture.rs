//! Tiny ONNX classifiers built in memory, so the tract path can be exercised
//! without shipping a model artifact.

use prost::Message;
use std::io::Write;
use tempfile::NamedTempFile;
use tract_onnx::pb::{
    self, attribute_proto::AttributeType, tensor_proto::DataType, tensor_shape_proto::dimension,
    type_proto,
};

/// Input `[1, 224, 224, 3]` → `ReduceMean(axes=[1, 2])` → `Softmax`.
/// Scores follow the mean of each RGB channel, so a red image ranks class 0
/// first and a blue image ranks class 2 first.
pub fn channel_mean_model() -> NamedTempFile {
    let graph = pb::GraphProto {
        name: "channel_mean".to_string(),
        node: vec![
            pb::NodeProto {
                input: vec!["image".to_string()],
                output: vec!["means".to_string()],
                name: "reduce".to_string(),
                op_type: "ReduceMean".to_string(),
                attribute: vec![ints_attr("axes", vec![1, 2]), int_attr("keepdims", 0)],
                ..Default::default()
            },
            pb::NodeProto {
                input: vec!["means".to_string()],
                output: vec!["scores".to_string()],
                name: "softmax".to_string(),
                op_type: "Softmax".to_string(),
                ..Default::default()
            },
        ],
        input: vec![float_value("image", &[1, 224, 224, 3])],
        output: vec![float_value("scores", &[1, 3])],
        ..Default::default()
    };

    write_model(graph)
}

fn write_model(graph: pb::GraphProto) -> NamedTempFile {
    let model = pb::ModelProto {
        ir_version: 8,
        producer_name: "sports-classifier-tests".to_string(),
        opset_import: vec![pb::OperatorSetIdProto {
            domain: String::new(),
            version: 13,
        }],
        graph: Some(graph),
        ..Default::default()
    };

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&model.encode_to_vec()).unwrap();
    file.flush().unwrap();
    file
}

fn float_value(name: &str, dims: &[i64]) -> pb::ValueInfoProto {
    let dim = dims
        .iter()
        .map(|d| pb::tensor_shape_proto::Dimension {
            value: Some(dimension::Value::DimValue(*d)),
            ..Default::default()
        })
        .collect();

    pb::ValueInfoProto {
        name: name.to_string(),
        r#type: Some(pb::TypeProto {
            value: Some(type_proto::Value::TensorType(type_proto::Tensor {
                elem_type: DataType::Float as i32,
                shape: Some(pb::TensorShapeProto { dim }),
            })),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn ints_attr(name: &str, ints: Vec<i64>) -> pb::AttributeProto {
    pb::AttributeProto {
        name: name.to_string(),
        r#type: AttributeType::Ints as i32,
        ints,
        ..Default::default()
    }
}

fn int_attr(name: &str, i: i64) -> pb::AttributeProto {
    pb::AttributeProto {
        name: name.to_string(),
        r#type: AttributeType::Int as i32,
        i,
        ..Default::default()
    }
}
