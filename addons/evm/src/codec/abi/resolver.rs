use alloy::dyn_abi::{DynSolType, Specifier};
use alloy::json_abi::{Function, JsonAbi, Param};
use alloy::primitives::Selector as FunctionSelector;
use error_stack::{Report, ResultExt};

use super::types::{TupleField, TypeDescriptor};
use crate::errors::{BridgeError, BridgeResult};

/// Which callable of the interface to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    Constructor,
    Method(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedMethod {
    pub name: String,
    pub signature: String,
    pub selector: FunctionSelector,
    pub inputs: Vec<TypeDescriptor>,
}

/// Parsed contract interface (JSON ABI).
#[derive(Debug, Clone)]
pub struct InterfaceDescription {
    abi: JsonAbi,
}

impl InterfaceDescription {
    pub fn parse(document: &str) -> BridgeResult<Self> {
        let abi: JsonAbi = serde_json::from_str(document)
            .map_err(|e| Report::new(BridgeError::InterfaceParse(e.to_string())))
            .attach_printable("Parsing contract ABI")?;
        Ok(Self { abi })
    }

    /// A missing constructor entry is the implicit zero-argument constructor.
    pub fn constructor_inputs(&self) -> BridgeResult<Vec<TypeDescriptor>> {
        match &self.abi.constructor {
            Some(constructor) => params_to_descriptors(&constructor.inputs)
                .attach_printable("Resolving constructor inputs"),
            None => Ok(vec![]),
        }
    }

    /// Resolves a method by name or by full signature (`transfer(address,uint256)`).
    /// Overloads are disambiguated by `arg_count` when given.
    pub fn method(&self, selector: &str, arg_count: Option<usize>) -> BridgeResult<ResolvedMethod> {
        let candidates: Vec<&Function> = if selector.contains('(') {
            self.abi.functions().filter(|f| f.signature() == selector).collect()
        } else {
            self.abi.function(selector).map(|fs| fs.iter().collect()).unwrap_or_default()
        };

        if candidates.is_empty() {
            let mut error =
                Report::new(BridgeError::SelectorNotFound { selector: selector.to_string() });
            let available = self.method_names();
            if !available.is_empty() {
                error = error.attach_printable(format!("Available methods: {}", available.join(", ")));
                for name in available.iter() {
                    if name.to_lowercase() == selector.to_lowercase() {
                        error = error
                            .attach_printable(format!("Did you mean '{}'? (case-sensitive)", name));
                    }
                }
            }
            return Err(error);
        }

        let function = match (candidates.len(), arg_count) {
            (1, _) => candidates[0],
            (_, Some(count)) => {
                let matching: Vec<&Function> =
                    candidates.iter().copied().filter(|f| f.inputs.len() == count).collect();
                match matching.len() {
                    1 => matching[0],
                    0 => {
                        return Err(Report::new(BridgeError::ArgumentCount {
                            expected: candidates[0].inputs.len(),
                            actual: count,
                        }))
                        .attach_printable(format!(
                            "No overload of '{}' takes {} arguments: {}",
                            selector,
                            count,
                            signatures(&candidates)
                        ))
                    }
                    _ => return Err(ambiguous(selector, &matching)),
                }
            }
            (_, None) => return Err(ambiguous(selector, &candidates)),
        };

        let inputs = params_to_descriptors(&function.inputs)
            .attach_printable(format!("Resolving inputs of '{}'", function.signature()))?;

        Ok(ResolvedMethod {
            name: function.name.clone(),
            signature: function.signature(),
            selector: function.selector(),
            inputs,
        })
    }

    pub fn method_names(&self) -> Vec<String> {
        self.abi.functions.keys().cloned().collect()
    }
}

/// Ordered input descriptors of the selected callable.
pub fn resolve(document: &str, selector: Selector<'_>) -> BridgeResult<Vec<TypeDescriptor>> {
    let interface = InterfaceDescription::parse(document)?;
    match selector {
        Selector::Constructor => interface.constructor_inputs(),
        Selector::Method(name) => interface.method(name, None).map(|method| method.inputs),
    }
}

fn ambiguous(selector: &str, candidates: &[&Function]) -> Report<BridgeError> {
    Report::new(BridgeError::SelectorNotFound { selector: selector.to_string() })
        .attach_printable(format!(
            "'{}' is overloaded, use a full signature: {}",
            selector,
            signatures(candidates)
        ))
}

fn signatures(candidates: &[&Function]) -> String {
    candidates.iter().map(|f| f.signature()).collect::<Vec<_>>().join(", ")
}

pub fn params_to_descriptors(params: &[Param]) -> BridgeResult<Vec<TypeDescriptor>> {
    params
        .iter()
        .enumerate()
        .map(|(i, param)| {
            param_to_descriptor(param)
                .attach_printable(format!("Parameter #{} ({})", i, param.name))
        })
        .collect()
}

pub fn param_to_descriptor(param: &Param) -> BridgeResult<TypeDescriptor> {
    let sol_type = param
        .resolve()
        .map_err(|e| Report::new(BridgeError::InterfaceParse(format!("{}: {}", param.ty, e))))?;
    sol_type_to_descriptor(&sol_type, &param.components)
}

// Array element types share the components of the param they came from.
fn sol_type_to_descriptor(
    sol_type: &DynSolType,
    components: &[Param],
) -> BridgeResult<TypeDescriptor> {
    let descriptor = match sol_type {
        DynSolType::Bool => TypeDescriptor::Bool,
        DynSolType::Int(bits) => TypeDescriptor::Int(*bits),
        DynSolType::Uint(bits) => TypeDescriptor::Uint(*bits),
        DynSolType::FixedBytes(size) => TypeDescriptor::FixedBytes(*size),
        DynSolType::Address => TypeDescriptor::Address,
        DynSolType::Bytes => TypeDescriptor::Bytes,
        DynSolType::String => TypeDescriptor::String,
        DynSolType::Array(inner) => {
            TypeDescriptor::Array(Box::new(sol_type_to_descriptor(inner, components)?))
        }
        DynSolType::FixedArray(inner, size) => {
            TypeDescriptor::FixedArray(Box::new(sol_type_to_descriptor(inner, components)?), *size)
        }
        DynSolType::Tuple(types) => TypeDescriptor::Tuple(tuple_fields(types, components, None)?),
        DynSolType::CustomStruct { prop_names, tuple, .. } => {
            TypeDescriptor::Tuple(tuple_fields(tuple, components, Some(prop_names))?)
        }
        #[allow(unreachable_patterns)]
        other => {
            return Err(Report::new(BridgeError::UnsupportedType(
                other.sol_type_name().to_string(),
            )))
        }
    };
    Ok(descriptor)
}

fn tuple_fields(
    types: &[DynSolType],
    components: &[Param],
    names: Option<&Vec<String>>,
) -> BridgeResult<Vec<TupleField>> {
    types
        .iter()
        .enumerate()
        .map(|(i, ty)| {
            let component = components.get(i);
            let name = names
                .and_then(|names| names.get(i).cloned())
                .or_else(|| component.map(|c| c.name.clone()))
                .unwrap_or_default();
            let nested = component.map(|c| c.components.as_slice()).unwrap_or(&[]);
            Ok(TupleField { name, ty: sol_type_to_descriptor(ty, nested)? })
        })
        .collect()
}
