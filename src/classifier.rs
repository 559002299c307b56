//! Species classification over a pre-trained ONNX artifact
//!
//! The artifact (`penguins_rf.onnx`) takes one 5-feature row named
//! `features` and emits a class code. Loading happens once at startup;
//! a load failure disables classification without killing the process.

use crate::models::{BiometricRecord, SpeciesLabel};
use crate::{Error, Result};
use std::path::Path;
use tract_onnx::prelude::*;

/// Seam over the inference artifact so tests can substitute fixed outputs
pub trait SpeciesModel: Send + Sync {
    /// Run one input row through the model and return the class code
    fn predict_class(&self, row: [f32; 5]) -> anyhow::Result<i64>;
}

/// Production model backed by tract-onnx
pub struct OnnxSpeciesModel {
    plan: TypedRunnableModel<TypedModel>,
}

impl OnnxSpeciesModel {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let plan = tract_onnx::onnx()
            .model_for_path(path)?
            .with_input_fact(0, InferenceFact::dt_shape(f32::datum_type(), tvec!(1, 5)))?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self { plan })
    }
}

impl SpeciesModel for OnnxSpeciesModel {
    fn predict_class(&self, row: [f32; 5]) -> anyhow::Result<i64> {
        let input = tract_ndarray::Array2::from_shape_vec((1, 5), row.to_vec())?;
        let outputs = self.plan.run(tvec!(Tensor::from(input).into()))?;

        // First output is the label tensor; cast covers artifacts that
        // emit i32 labels instead of i64.
        let labels = outputs[0].cast_to::<i64>()?;
        let class = labels
            .to_array_view::<i64>()?
            .iter()
            .next()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("classifier emitted an empty label tensor"))?;

        Ok(class)
    }
}

/// Classifier facade: feature ordering, inference, label mapping
pub struct SpeciesClassifier {
    model: Box<dyn SpeciesModel>,
}

impl SpeciesClassifier {
    /// Load the production ONNX artifact from disk
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        Ok(Self {
            model: Box::new(OnnxSpeciesModel::load(path)?),
        })
    }

    /// Wrap an arbitrary model implementation (test stubs)
    pub fn from_model(model: Box<dyn SpeciesModel>) -> Self {
        Self { model }
    }

    /// Classify a biometric record into a species label.
    ///
    /// Never errors for well-formed numeric input with a working model;
    /// unrecognized class codes map to [`SpeciesLabel::Unknown`].
    pub fn classify(&self, record: &BiometricRecord) -> Result<SpeciesLabel> {
        let class = self
            .model
            .predict_class(record.as_model_input())
            .map_err(|e| Error::Internal(format!("classifier inference failed: {e}")))?;

        Ok(SpeciesLabel::from_class_index(class))
    }
}
