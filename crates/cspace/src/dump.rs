//! JSON debug dumps of the core types.
//!
//! Not a stable format: field names follow the Rust structs and may change.
//! Use `to_json_pretty` for indented text in logs and test failure output.

use nalgebra::{Vector3, Vector4};
use serde_json::{json, Value};

use crate::algebra::Spin3;
use crate::bezier::BezierQQ4;
use crate::geom4::{Hull4, Plane4};
use crate::param::PredGParam;
use crate::pred::{Plane3, PredG};

pub trait ToJson {
    fn to_json(&self) -> Value;

    /// Indented JSON text.
    fn to_json_pretty(&self) -> String {
        format!("{:#}", self.to_json())
    }
}

impl ToJson for Vector3<f64> {
    fn to_json(&self) -> Value {
        json!({ "x": self.x, "y": self.y, "z": self.z })
    }
}

impl ToJson for Vector4<f64> {
    fn to_json(&self) -> Value {
        json!({ "x": self.x, "y": self.y, "z": self.z, "w": self.w })
    }
}

impl ToJson for Spin3 {
    fn to_json(&self) -> Value {
        json!({ "s12": self.s12, "s23": self.s23, "s31": self.s31, "s0": self.s0 })
    }
}

impl ToJson for Plane3<f64> {
    fn to_json(&self) -> Value {
        json!({ "n": self.n.to_json(), "c": self.c })
    }
}

impl ToJson for Plane4 {
    fn to_json(&self) -> Value {
        json!({ "n": self.n.to_json(), "c": self.c })
    }
}

impl ToJson for Hull4 {
    fn to_json(&self) -> Value {
        json!({
            "h": self.h.iter().map(ToJson::to_json).collect::<Vec<_>>(),
            "v": self.v.iter().map(ToJson::to_json).collect::<Vec<_>>(),
            "vol": self.vol,
            "area": self.area,
        })
    }
}

impl ToJson for PredG<f64> {
    fn to_json(&self) -> Value {
        json!({
            "k": self.k.to_json(),
            "l": self.l.to_json(),
            "a": self.a.to_json(),
            "b": self.b.to_json(),
            "c": self.c,
        })
    }
}

impl ToJson for PredGParam {
    fn to_json(&self) -> Value {
        json!({
            "t": self.t.name(),
            "p": self.p.to_json(),
            "q": self.q.to_json(),
            "u": self.u.to_json(),
            "v": self.v.to_json(),
            "a": self.a,
            "b": self.b,
            "c": self.c,
            "e": self.e.to_json(),
            "ev": self.ev.iter().map(ToJson::to_json).collect::<Vec<_>>(),
        })
    }
}

impl ToJson for BezierQQ4 {
    fn to_json(&self) -> Value {
        let cp: Vec<Vec<Value>> = self
            .cp
            .iter()
            .map(|row| row.iter().map(ToJson::to_json).collect())
            .collect();
        json!({ "cp": cp, "hull": self.hull.to_json() })
    }
}
