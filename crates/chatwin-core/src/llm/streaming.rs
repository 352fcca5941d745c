//! Streamed text responses

use crate::error::ChatResult;
use futures::{Stream, StreamExt};
use std::pin::Pin;

/// Stream of response text chunks
pub type TextStream = Pin<Box<dyn Stream<Item = ChatResult<String>> + Send>>;

/// Collect a stream into a single string
pub async fn collect_stream(mut stream: TextStream) -> ChatResult<String> {
    let mut content = String::new();
    while let Some(chunk) = stream.next().await {
        content.push_str(&chunk?);
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChatError;
    use futures::stream;

    #[tokio::test]
    async fn test_collect_stream_concatenates_in_order() {
        let chunks: Vec<ChatResult<String>> =
            vec![Ok("Hel".to_string()), Ok("lo ".to_string()), Ok("there".to_string())];
        let text = collect_stream(Box::pin(stream::iter(chunks))).await.unwrap();
        assert_eq!(text, "Hello there");
    }

    #[tokio::test]
    async fn test_collect_stream_propagates_error() {
        let chunks = vec![Ok("partial".to_string()), Err(ChatError::llm("connection dropped"))];
        let err = collect_stream(Box::pin(stream::iter(chunks))).await.unwrap_err();
        assert_eq!(err.error_code(), "CHAT_LLM");
    }

    #[test]
    fn test_collect_stream_waits_for_end_of_stream() {
        let chunks = stream::iter(vec![Ok::<_, ChatError>("partial".to_string())])
            .chain(stream::pending());
        let mut task = tokio_test::task::spawn(collect_stream(Box::pin(chunks)));
        tokio_test::assert_pending!(task.poll());
    }

    #[test]
    fn test_collect_stream_blocking() {
        let chunks: Vec<ChatResult<String>> = vec![Ok("a".to_string()), Ok("b".to_string())];
        let text = tokio_test::assert_ok!(tokio_test::block_on(collect_stream(Box::pin(
            stream::iter(chunks)
        ))));
        assert_eq!(text, "ab");
    }
}
