// Period text generation: turns a prompt, a page length, and an era into a
// typewritten-style draft. The only LLM consumer; calls go through llm_client.

pub mod handlers;
pub mod prompts;
pub mod request;
