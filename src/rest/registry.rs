//! Handler Registry
//!
//! 按名称登记业务函数，启动时再按名称取出已适配的 [`Handler`]。
//! 适用于处理器由配置决定的场景；不负责 URL 路由。

use std::any::type_name;
use std::collections::HashMap;

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

use super::adapter::{adapt, Handler};
use super::request::Request;
use super::translator::ErrorTranslator;

/// 适配错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdaptError {
    #[error("handler already registered: {0}")]
    Duplicate(String),

    #[error("no handler registered under name: {0}")]
    UnknownHandler(String),
}

/// 已登记函数的类型签名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub input: &'static str,
    pub output: &'static str,
    pub error: &'static str,
}

struct Entry<R> {
    handler: Handler<R>,
    signature: Signature,
}

/// 名称 -> 已适配处理器
pub struct HandlerRegistry<R> {
    entries: HashMap<String, Entry<R>>,
}

impl<R: Request + 'static> HandlerRegistry<R> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// 登记业务函数，名称重复返回 [`AdaptError::Duplicate`]
    pub fn register<F, I, O, E, T>(
        &mut self,
        name: &str,
        function: F,
        translator: T,
    ) -> Result<(), AdaptError>
    where
        F: Fn(I) -> Result<O, E> + Send + Sync + 'static,
        I: DeserializeOwned,
        O: Serialize + Send + 'static,
        E: std::error::Error + Send + Sync + 'static,
        T: ErrorTranslator<E> + 'static,
    {
        if self.entries.contains_key(name) {
            return Err(AdaptError::Duplicate(name.to_string()));
        }

        let signature = Signature {
            input: type_name::<I>(),
            output: type_name::<O>(),
            error: type_name::<E>(),
        };
        tracing::debug!(
            handler = %name,
            input = signature.input,
            output = signature.output,
            error = signature.error,
            "Handler registered"
        );

        self.entries.insert(
            name.to_string(),
            Entry {
                handler: adapt(function, translator),
                signature,
            },
        );
        Ok(())
    }

    /// 按名称取出处理器
    pub fn adapt(&self, name: &str) -> Result<Handler<R>, AdaptError> {
        self.entries
            .get(name)
            .map(|entry| entry.handler.clone())
            .ok_or_else(|| AdaptError::UnknownHandler(name.to_string()))
    }

    /// 按名称取出处理器，失败直接终止
    ///
    /// 只用于进程启动时的一次性装配，不能用在处理请求的路径上。
    ///
    /// # Panics
    ///
    /// 名称未登记时 panic。
    pub fn must_adapt(&self, name: &str) -> Handler<R> {
        match self.adapt(name) {
            Ok(handler) => handler,
            Err(err) => panic!("{}", err),
        }
    }

    pub fn signature(&self, name: &str) -> Option<Signature> {
        self.entries.get(name).map(|entry| entry.signature)
    }

    /// 已登记名称（排序）
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<R: Request + 'static> Default for HandlerRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}
