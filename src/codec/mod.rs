//! Wire encoding of match results.
//!
//! A matched result is encoded with its full field set and `state: 1`.
//! The degenerate result is encoded as `{"state": 0}` alone, so consumers
//! must branch on `state` before reading any other field.


use crate::route::MatchResult;

use geo::{Geometry, LineString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wkt::{ToWkt, TryFromWkt};

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response field `{field}` is not a LINESTRING: {reason}")]
    Geometry { field: &'static str, reason: String },

    #[error("response with state {0} is missing `{1}`")]
    MissingField(u8, &'static str),

    #[error("unknown response state {0}")]
    UnknownState(u8),
}

/// The fields of a matched response.
#[derive(Clone, Debug, PartialEq)]
pub struct Matched {
    pub mgeom_wkt: String,
    pub pgeom_wkt: String,
    pub opath: Vec<i64>,
    pub cpath: Vec<i64>,
    pub indices: Vec<usize>,
    pub offset: Vec<f64>,
    pub length: Vec<f64>,
    pub spdist: Vec<f64>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(into = "WireResponse", try_from = "WireResponse")]
pub enum Response {
    Matched(Matched),
    Unmatched,
}

impl Response {
    /// Encodes a match result, collapsing the degenerate result to
    /// [`Response::Unmatched`].
    pub fn encode(result: &MatchResult) -> Self {
        if result.is_empty() {
            return Response::Unmatched;
        }

        Response::Matched(Matched {
            mgeom_wkt: result.mgeom.wkt_string(),
            pgeom_wkt: if result.pgeom.0.is_empty() {
                String::new()
            } else {
                result.pgeom.wkt_string()
            },
            opath: result.opath.clone(),
            cpath: result.cpath.clone(),
            indices: result.indices.clone(),
            offset: result.offset.clone(),
            length: result.length.clone(),
            spdist: result.spdist.clone(),
        })
    }

    #[inline]
    pub fn state(&self) -> u8 {
        match self {
            Response::Matched(_) => 1,
            Response::Unmatched => 0,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Decodes the response back into the result it encodes.
    pub fn into_result(self) -> Result<MatchResult, CodecError> {
        let Response::Matched(matched) = self else {
            return Ok(MatchResult::default());
        };

        Ok(MatchResult {
            mgeom: geometry("mgeom_wkt", &matched.mgeom_wkt)?,
            pgeom: geometry("pgeom_wkt", &matched.pgeom_wkt)?,
            opath: matched.opath,
            cpath: matched.cpath,
            indices: matched.indices,
            offset: matched.offset,
            length: matched.length,
            spdist: matched.spdist,
        })
    }
}

fn geometry(field: &'static str, text: &str) -> Result<LineString, CodecError> {
    if text.is_empty() {
        return Ok(LineString::new(vec![]));
    }

    match Geometry::<f64>::try_from_wkt_str(text) {
        Ok(Geometry::LineString(line)) => Ok(line),
        Ok(_) => Err(CodecError::Geometry {
            field,
            reason: "unexpected geometry type".to_string(),
        }),
        Err(err) => Err(CodecError::Geometry {
            field,
            reason: err.to_string(),
        }),
    }
}

/// The flat shape of a response on the wire.
#[derive(Serialize, Deserialize, Default)]
struct WireResponse {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    mgeom_wkt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pgeom_wkt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    opath: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    cpath: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    indices: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    offset: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    length: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    spdist: Option<Vec<f64>>,
    state: u8,
}

impl From<Response> for WireResponse {
    fn from(response: Response) -> Self {
        match response {
            Response::Unmatched => WireResponse::default(),
            Response::Matched(matched) => WireResponse {
                mgeom_wkt: Some(matched.mgeom_wkt),
                pgeom_wkt: Some(matched.pgeom_wkt),
                opath: Some(matched.opath),
                cpath: Some(matched.cpath),
                indices: Some(matched.indices),
                offset: Some(matched.offset),
                length: Some(matched.length),
                spdist: Some(matched.spdist),
                state: 1,
            },
        }
    }
}

impl TryFrom<WireResponse> for Response {
    type Error = CodecError;

    fn try_from(wire: WireResponse) -> Result<Self, Self::Error> {
        match wire.state {
            0 => Ok(Response::Unmatched),
            1 => {
                let missing = |field| CodecError::MissingField(1, field);

                Ok(Response::Matched(Matched {
                    mgeom_wkt: wire.mgeom_wkt.ok_or_else(|| missing("mgeom_wkt"))?,
                    pgeom_wkt: wire.pgeom_wkt.ok_or_else(|| missing("pgeom_wkt"))?,
                    opath: wire.opath.ok_or_else(|| missing("opath"))?,
                    cpath: wire.cpath.ok_or_else(|| missing("cpath"))?,
                    indices: wire.indices.ok_or_else(|| missing("indices"))?,
                    offset: wire.offset.ok_or_else(|| missing("offset"))?,
                    length: wire.length.ok_or_else(|| missing("length"))?,
                    spdist: wire.spdist.ok_or_else(|| missing("spdist"))?,
                }))
            }
            state => Err(CodecError::UnknownState(state)),
        }
    }
}
