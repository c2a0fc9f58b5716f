//! テスト用: 固定の応答を返す StructuredCompletion / DocumentReader / ProfileLister 実装

#[cfg(test)]
mod stub {
    use std::sync::Mutex;

    use common::error::Error;
    use common::schema::ResponseSchema;
    use serde_json::Value;

    use crate::domain::{Document, InputSource, ModelSelection};
    use crate::ports::outbound::{DocumentReader, ProfileLister, StructuredCompletion};

    /// 呼び出し 1 回分の記録
    #[derive(Debug, Clone)]
    pub struct RecordedCall {
        pub selection: ModelSelection,
        pub system_instruction: Option<String>,
        pub user_message: String,
    }

    /// テスト用: 用意した結果を返し、呼び出しを記録する Stub
    ///
    /// 実アダプタと同様に、返す値はスキーマで検証してから返す。
    pub struct StubCompletion {
        result: Result<Value, Error>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl StubCompletion {
        pub fn returning(value: Value) -> Self {
            Self {
                result: Ok(value),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(err: Error) -> Self {
            Self {
                result: Err(err),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl StructuredCompletion for StubCompletion {
        fn complete(
            &self,
            selection: &ModelSelection,
            system_instruction: Option<&str>,
            user_message: &str,
            schema: &ResponseSchema,
        ) -> Result<Value, Error> {
            self.calls.lock().unwrap().push(RecordedCall {
                selection: selection.clone(),
                system_instruction: system_instruction.map(|s| s.to_string()),
                user_message: user_message.to_string(),
            });
            let value = self.result.clone()?;
            schema
                .validate(&value)
                .map_err(|errors| Error::schema(1, errors))?;
            Ok(value)
        }
    }

    /// テスト用: 固定の本文を返す DocumentReader
    pub struct StubDocumentReader(pub String);

    impl DocumentReader for StubDocumentReader {
        fn read(&self, _source: &InputSource) -> Result<Document, Error> {
            Ok(Document::new(self.0.clone()))
        }
    }

    /// テスト用: 固定の一覧を返す ProfileLister
    pub struct StubProfileLister;

    impl ProfileLister for StubProfileLister {
        fn list_profiles(&self) -> Result<(Vec<String>, String), Error> {
            Ok((
                vec!["gpt".to_string(), "groq".to_string(), "openai".to_string()],
                "openai".to_string(),
            ))
        }
    }
}

#[cfg(test)]
pub use stub::{StubCompletion, StubDocumentReader, StubProfileLister};
