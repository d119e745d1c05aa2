use crate::metadata::{
    method::{MethodBaseBuilder, MethodBaseRc},
    tables::{GenericParam, GenericParamRc},
    token::Token,
    typesystem::{CilFlavor, CilType, CilTypeRc},
};

// Helper function to create a GenericParam declared on a method
pub fn create_generic_param(number: u32, name: &str) -> GenericParamRc {
    GenericParam::new(Token::new(0x2A00_0001 + number), number, 0, name)
}

// Helper function to create System.Int32
pub fn create_int32() -> CilTypeRc {
    CilType::primitive(CilFlavor::I4, "System", "Int32")
}

// Helper function to create System.String
pub fn create_string() -> CilTypeRc {
    CilType::primitive(CilFlavor::String, "System", "String")
}

// Helper function to create a frozen public instance method with the given parameter types
pub fn create_method(rid: u32, name: &str, param_types: &[CilTypeRc]) -> MethodBaseRc {
    MethodBaseBuilder::with_param_types(Token::new(0x0600_0000 + rid), name, 0x0086, param_types)
        .build()
        .unwrap()
}
