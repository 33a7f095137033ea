// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Attribute macros of the `kplat` crate.

use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use quote::quote;
use syn::{Error, FnArg, ItemFn, ItemTrait, ReturnType, TraitItem, TraitItemFn, Type};

fn err_ts(e: Error) -> TokenStream {
    e.to_compile_error().into()
}

fn is_usize(ty: &Type) -> bool {
    matches!(ty, Type::Path(p) if p.qself.is_none() && p.path.is_ident("usize"))
}

/// Number of machine words the architecture start-up code hands over.
const BOOT_ARG_WORDS: usize = 4;

/// Marks the kernel entry the architecture start-up code jumps to on the
/// boot CPU.
///
/// Signature: `fn(arg0: usize, arg1: usize, arg2: usize, arg3: usize) -> !`,
/// exported as `__kplat_main`.
#[proc_macro_attribute]
pub fn main(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return err_ts(Error::new(Span::call_site(), "expect an empty attribute: `#[main]`"));
    }
    let f = syn::parse_macro_input!(item as ItemFn);
    let diverges = match &f.sig.output {
        ReturnType::Type(_, ty) => matches!(**ty, Type::Never(_)),
        ReturnType::Default => false,
    };
    let words_ok = f.sig.inputs.len() == BOOT_ARG_WORDS
        && f.sig.inputs.iter().all(|arg| match arg {
            FnArg::Typed(pt) => is_usize(&pt.ty),
            FnArg::Receiver(_) => false,
        });
    if !diverges || !words_ok {
        return err_ts(Error::new_spanned(
            &f.sig,
            "expect `fn(usize, usize, usize, usize) -> !`",
        ));
    }
    quote! {
        #[unsafe(export_name = "__kplat_main")]
        #f
    }
    .into()
}

/// Builds the free function that forwards one interface method to the
/// implementation linked into the image.
fn forwarder(iface: &Ident, method: &TraitItemFn) -> Result<TokenStream2, Error> {
    let sig = &method.sig;
    if !sig.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &sig.generics,
            "interface methods cannot be generic",
        ));
    }
    let params = sig
        .inputs
        .iter()
        .map(|input| match input {
            FnArg::Typed(pt) => Ok(pt.pat.as_ref()),
            FnArg::Receiver(recv) => Err(Error::new_spanned(
                recv,
                "interface methods take no receiver",
            )),
        })
        .collect::<Result<Vec<_>, _>>()?;
    let docs = &method.attrs;
    let name = &sig.ident;
    Ok(quote! {
        #(#docs)*
        #[inline]
        pub #sig {
            crate::__priv::dispatch!(#iface::#name, #(#params),*)
        }
    })
}

/// Declares a collaborator interface and a free function per method that
/// dispatches to the single link-time implementation.
#[proc_macro_attribute]
pub fn device_interface(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return err_ts(Error::new(
            Span::call_site(),
            "expect an empty attribute: `#[device_interface]`",
        ));
    }
    let iface = syn::parse_macro_input!(item as ItemTrait);
    let forwarders = iface.items.iter().filter_map(|item| match item {
        TraitItem::Fn(method) => Some(forwarder(&iface.ident, method)),
        _ => None,
    });
    let forwarders = match forwarders.collect::<Result<Vec<_>, _>>() {
        Ok(fns) => fns,
        Err(e) => return err_ts(e),
    };
    quote! {
        #[crate::__priv::interface_def]
        #iface
        #(#forwarders)*
    }
    .into()
}
