//! Name lookup over WGSL source text.
//!
//! wgpu binds by numeric slot, but the render passes address their inputs by
//! the names the shaders declare. These helpers resolve
//! `@location(N) name: T` (vertex attributes) and
//! `@group(G) @binding(B) var<...> name: T` (uniforms, textures, samplers).
//!
//! The scanner understands exactly the declaration forms used by the embedded
//! shaders. Line and (nested) block comments are ignored. Attributes are the
//! `@location` members of the struct `vs_main` takes as input; locations on
//! stage outputs never match.

/// Returns the `@location` index of the vertex attribute declared as `name`.
pub(crate) fn find_attribute(source: &str, name: &str) -> Option<u32> {
    let source = strip_comments(source);
    let input = vertex_input_type(&source)?;
    let mut rest = struct_body(&source, input)?;

    while let Some(at) = rest.find("@location(") {
        rest = &rest[at + "@location(".len()..];
        let Some((location, after)) = parse_index(rest) else { continue };
        if declared_name(after) == Some(name) {
            return Some(location);
        }
    }

    None
}

/// Returns `(group, binding)` of the resource variable declared as `name`.
pub(crate) fn find_binding(source: &str, name: &str) -> Option<(u32, u32)> {
    let source = strip_comments(source);
    let mut rest = source.as_str();

    while let Some(at) = rest.find("@group(") {
        rest = &rest[at + "@group(".len()..];
        let Some((group, after)) = parse_index(rest) else { continue };
        let Some(after) = after.trim_start().strip_prefix("@binding(") else { continue };
        let Some((binding, after)) = parse_index(after) else { continue };
        let Some(after) = after.trim_start().strip_prefix("var") else { continue };

        let after = after.trim_start();
        let after = match after.strip_prefix('<') {
            Some(qualified) => match qualified.find('>') {
                Some(end) => &qualified[end + 1..],
                None => continue,
            },
            None => after,
        };

        if declared_name(after) == Some(name) {
            return Some((group, binding));
        }
    }

    None
}

/// Parses `N)` at the start of `s`, returning `N` and the text after `)`.
fn parse_index(s: &str) -> Option<(u32, &str)> {
    let close = s.find(')')?;
    let index = s[..close].trim().parse().ok()?;
    Some((index, &s[close + 1..]))
}

/// Type name of the first non-builtin parameter of `vs_main`.
fn vertex_input_type(source: &str) -> Option<&str> {
    let at = source.find("fn vs_main(")?;
    let params = &source[at + "fn vs_main(".len()..];
    let params = &params[..closing_paren(params)?];

    params
        .split(',')
        .filter(|param| !param.contains("@builtin"))
        .find_map(|param| param.split_once(':'))
        .and_then(|(_, ty)| leading_ident(ty))
}

/// Index of the `)` closing an already opened `(`.
fn closing_paren(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in s.char_indices() {
        match c {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(i),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Text between the braces of `struct name { ... }`.
fn struct_body<'a>(source: &'a str, name: &str) -> Option<&'a str> {
    let mut rest = source;
    while let Some(at) = rest.find("struct ") {
        rest = &rest[at + "struct ".len()..];
        if leading_ident(rest) != Some(name) {
            continue;
        }
        let open = rest.find('{')?;
        let body = &rest[open + 1..];
        return Some(&body[..body.find('}')?]);
    }
    None
}

fn leading_ident(s: &str) -> Option<&str> {
    let s = s.trim_start();
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(s.len());
    (end > 0).then(|| &s[..end])
}

/// Reads `ident :` at the start of `s` (after whitespace).
fn declared_name(s: &str) -> Option<&str> {
    let ident = leading_ident(s)?;
    let after = &s.trim_start()[ident.len()..];
    after.trim_start().starts_with(':').then_some(ident)
}

/// Replaces `// ...` and `/* ... */` (which nest in WGSL) with whitespace.
fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;
    let mut depth = 0usize;

    while !rest.is_empty() {
        if rest.starts_with("/*") {
            depth += 1;
            rest = &rest[2..];
            out.push(' ');
        } else if depth > 0 && rest.starts_with("*/") {
            depth -= 1;
            rest = &rest[2..];
            out.push(' ');
        } else if depth == 0 && rest.starts_with("//") {
            rest = rest.find('\n').map_or("", |end| &rest[end..]);
        } else {
            let mut chars = rest.chars();
            if let Some(c) = chars.next() {
                if depth == 0 || c == '\n' {
                    out.push(c);
                }
            }
            rest = chars.as_str();
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        @group(0) @binding(0) var<uniform> projection_matrix: mat4x4<f32>;
        @group(1) @binding(3)
        var lines_frame_buffer: texture_2d<f32>;
        // @group(0) @binding(9) var<uniform> commented_out: f32;
        /* @group(0) @binding(5) var<uniform> block_ghost: f32;
           /* nested */ @group(0) @binding(6) var<uniform> nested_ghost: f32; */

        struct VertexOutput {
            @builtin(position) clip_position: vec4<f32>,
            @location(0) color: vec3<f32>,
        };

        struct VertexInput {
            @location(0) vertex_position: vec2<f32>,
            @location(4)   vertex_uv : vec2<f32>,
            /* @location(5) ghost_attribute: f32, */
        };

        @vertex
        fn vs_main(@builtin(vertex_index) index: u32, in: VertexInput) -> VertexOutput {
            var out: VertexOutput;
            return out;
        }

        @fragment
        fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
            return vec4<f32>(1.0);
        }
    "#;

    #[test]
    fn finds_vertex_attributes() {
        assert_eq!(find_attribute(SAMPLE, "vertex_position"), Some(0));
        assert_eq!(find_attribute(SAMPLE, "vertex_uv"), Some(4));
    }

    #[test]
    fn fragment_outputs_are_not_attributes() {
        assert_eq!(find_attribute(SAMPLE, "vec4"), None);
    }

    #[test]
    fn stage_outputs_are_not_attributes() {
        assert_eq!(find_attribute(SAMPLE, "color"), None);
        assert_eq!(find_attribute(SAMPLE, "clip_position"), None);
    }

    #[test]
    fn no_vertex_entry_means_no_attributes() {
        let src = "struct VertexInput { @location(0) vertex_position: vec2<f32>, };";
        assert_eq!(find_attribute(src, "vertex_position"), None);
    }

    #[test]
    fn finds_uniform_and_texture_bindings() {
        assert_eq!(find_binding(SAMPLE, "projection_matrix"), Some((0, 0)));
        assert_eq!(find_binding(SAMPLE, "lines_frame_buffer"), Some((1, 3)));
    }

    #[test]
    fn ignores_commented_declarations() {
        assert_eq!(find_binding(SAMPLE, "commented_out"), None);
        assert_eq!(find_binding(SAMPLE, "block_ghost"), None);
        assert_eq!(find_binding(SAMPLE, "nested_ghost"), None);
        assert_eq!(find_attribute(SAMPLE, "ghost_attribute"), None);
    }

    #[test]
    fn code_after_a_block_comment_is_kept() {
        let src = "/* old */ @group(0) @binding(3) var<uniform> kept: f32;";
        assert_eq!(find_binding(src, "kept"), Some((0, 3)));
    }

    #[test]
    fn unknown_names_are_missing() {
        assert_eq!(find_attribute(SAMPLE, "model_color"), None);
        assert_eq!(find_binding(SAMPLE, "star_density"), None);
    }

    #[test]
    fn prefix_of_a_name_does_not_match() {
        assert_eq!(find_attribute(SAMPLE, "vertex"), None);
        assert_eq!(find_binding(SAMPLE, "projection"), None);
    }
}
