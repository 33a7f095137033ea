// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Procedural macros for registering boot-time work.
//!
//! - [`register_init`] places a constructor in `.init_array`.
//! - [`init_hook`] adds an entry to the `kboot::INIT_HOOKS` level table.
use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{format_ident, quote};
use syn::{
    Error, Expr, ExprLit, Item, ItemFn, Lit, MetaNameValue, Token, parse::Parser,
    parse_macro_input, punctuated::Punctuated,
};

/// Checks that `func` has the shape of a boot callback: no arguments, no
/// return value, no generics.
fn check_callback(func: &ItemFn, what: &str) -> Result<(), Error> {
    if let syn::ReturnType::Type(..) = &func.sig.output {
        return Err(Error::new_spanned(
            &func.sig.output,
            format!("expect no return value for the {what}"),
        ));
    }
    if !func.sig.inputs.is_empty() {
        return Err(Error::new_spanned(
            &func.sig.inputs,
            format!("expect no input arguments for the {what}"),
        ));
    }
    if !func.sig.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &func.sig.generics,
            format!("the {what} must not be generic"),
        ));
    }
    Ok(())
}

/// Register a constructor function to be called once the heap is ready.
///
/// The function is placed in the `.init_array` section, which the boot path
/// walks with `kinit_setup::linked()` right after the heap initializer.
/// The function should have no input arguments and return nothing.
#[proc_macro_attribute]
pub fn register_init(attr: TokenStream, function: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return Error::new(
            Span::call_site(),
            "expect an empty attribute: `#[register_init]`",
        )
        .to_compile_error()
        .into();
    }

    let item: Item = parse_macro_input!(function as Item);
    let Item::Fn(func) = item else {
        return Error::new(Span::call_site(), "expect a function to be registered")
            .to_compile_error()
            .into();
    };
    if let Err(e) = check_callback(&func, "constructor function") {
        return e.to_compile_error().into();
    }

    let name = &func.sig.ident;
    let slot = format_ident!("_INIT_{}", name.to_string().to_uppercase());
    let attrs = &func.attrs;
    let block = &func.block;

    quote! {
        #[unsafe(link_section = ".init_array")]
        #[used]
        #[allow(non_upper_case_globals)]
        static #slot: extern "C" fn() = #name;

        #(#attrs)*
        #[unsafe(no_mangle)]
        pub extern "C" fn #name() {
            #block
        }
    }
    .into()
}

/// Register a function as an initialization hook at a boot level.
///
/// ```ignore
/// use kboot::{InitLevel, init_hook};
///
/// #[init_hook(level = InitLevel::PLATFORM)]
/// fn probe_uart() { /* ... */ }
///
/// #[init_hook(level = InitLevel::HEAP.offset(1), name = "slab caches")]
/// fn slab_init() { /* ... */ }
/// ```
///
/// `level` must be a constant expression of type `kboot::InitLevel`. `name`
/// defaults to the function name and only shows up in boot traces.
#[proc_macro_attribute]
pub fn init_hook(attr: TokenStream, function: TokenStream) -> TokenStream {
    let args = match Punctuated::<MetaNameValue, Token![,]>::parse_terminated.parse(attr) {
        Ok(args) => args,
        Err(e) => return e.to_compile_error().into(),
    };
    let func = parse_macro_input!(function as ItemFn);
    if let Err(e) = check_callback(&func, "init hook") {
        return e.to_compile_error().into();
    }

    let fn_name = &func.sig.ident;
    let mut level: Option<Expr> = None;
    let mut hook_name = fn_name.to_string();
    for arg in args {
        if arg.path.is_ident("level") {
            level = Some(arg.value);
        } else if arg.path.is_ident("name") {
            match arg.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => hook_name = s.value(),
                other => {
                    return Error::new_spanned(other, "`name` must be a string literal")
                        .to_compile_error()
                        .into();
                }
            }
        } else {
            return Error::new_spanned(arg.path, "unknown argument, expect `level` or `name`")
                .to_compile_error()
                .into();
        }
    }
    let Some(level) = level else {
        return Error::new(
            Span::call_site(),
            "missing level: `#[init_hook(level = InitLevel::...)]`",
        )
        .to_compile_error()
        .into();
    };

    let slot = format_ident!("__INIT_HOOK_{}", fn_name.to_string().to_uppercase());
    quote! {
        #func

        #[::kboot::linkme::distributed_slice(::kboot::INIT_HOOKS)]
        #[linkme(crate = ::kboot::linkme)]
        #[allow(non_upper_case_globals)]
        static #slot: ::kboot::InitHook = ::kboot::InitHook::new(#hook_name, #level, #fn_name);
    }
    .into()
}
