//! Rendering of a [`LookupFixture`] as a dual-backend C++ translation unit.
//!
//! The emitted file compiles against a benchmark driver that selects the
//! backend with a preprocessor define: `PRE` builds a compile-time prefix
//! table over `prefix::crtp`, `STL` builds a `std::unordered_map` keyed by
//! C strings with a djb2 hash. Either way the unit exports `<name>_sanity`
//! plus `<name>_lookup_every_{successful,failing}_{prefix,stl}` loops that
//! feed every lookup result to an opaque `value_sink`.
//!
//! Only clean misses appear in the sanity check and the failing loops. The
//! two backends disagree on prefix-collision probes by construction, so no
//! shared assertion or loop can include them; they ride along in the
//! fixture for future prefix-hit measurements.

use std::io::{self, Write};

use crate::corpus::{Corpus, LookupFixture};
use crate::{Key, NOT_FOUND};

const HEADER: &str = r#"#include "prefix.hpp"
#include <cassert>
#include <cstdint>
#include <cstring>
#include <limits>
#include <unordered_map>

#ifndef PRE
#ifndef STL
#error "require at least one of PRE and STL to be defined"
#endif
#endif

void value_sink(uint64_t);

"#;

const STL_PRELUDE: &str = r#"#ifdef STL

struct map_equal
{
  bool operator()(const char * x, const char * y) const
  {
    return strcmp(x, y) == 0;
  }
};

struct map_hash // djb2
{
  std::size_t operator()(const char * str) const
  {
    std::size_t hash = 5381;
    char c;
    while ((c = *str++))
    {
      hash = hash * 33 + c;
    }
    return hash;
  }
};

typedef std::unordered_map<const char *, uint64_t, map_hash, map_equal> map_type;

"#;

/// Format a key as a C string literal, every byte as a two-digit hex escape.
///
/// Escaping every byte sidesteps the maximal-munch rule for `\x` escapes: a
/// literal like `"\x1f"` would fold a following hex digit into the escape,
/// but here no byte is ever emitted as a bare character. Keys contain no
/// zero byte, so the literal round-trips through C-string termination.
pub fn cstr_literal(key: &[u8]) -> String {
    let mut out = String::with_capacity(key.len() * 4 + 2);
    out.push('"');
    for b in key {
        out.push_str(&format!("\\x{b:02x}"));
    }
    out.push('"');
    out
}

/// Write the complete translation unit for `fixture` to `out`.
///
/// `name` becomes the table struct and the stem of every exported symbol;
/// it must be a valid C identifier. An empty corpus renders a zero-length
/// table initializer, which C++ rejects; callers should warn before
/// emitting one.
pub fn write_unit<W: Write>(out: &mut W, name: &str, fixture: &LookupFixture) -> io::Result<()> {
    out.write_all(HEADER.as_bytes())?;
    write_prefix_table(out, name, &fixture.corpus)?;
    write_stl_map(out, name, &fixture.corpus)?;
    write_lookup_wrappers(out, name)?;
    write_sanity_check(out, name, fixture)?;
    write_bench_loops(out, name, fixture)
}

fn write_prefix_table<W: Write>(out: &mut W, name: &str, corpus: &Corpus) -> io::Result<()> {
    writeln!(out, "#ifdef PRE")?;
    writeln!(out, "struct {name} : prefix::crtp<{name},uint64_t>")?;
    writeln!(out, "{{")?;
    writeln!(out, "  static constexpr element table[] = {{")?;
    for (key, value) in corpus.iter() {
        writeln!(out, "    {{{},{value}u}},", cstr_literal(key))?;
    }
    writeln!(out, "  }};")?;
    writeln!(out, "}};")?;
    writeln!(out, "constexpr decltype({name}::table) {name}::table;")?;
    writeln!(
        out,
        "static_assert({name}::ordered<0, {name}::size()>(), \"Ordered\");"
    )?;
    writeln!(out, "#endif")?;
    writeln!(out)
}

fn write_stl_map<W: Write>(out: &mut W, name: &str, corpus: &Corpus) -> io::Result<()> {
    out.write_all(STL_PRELUDE.as_bytes())?;
    writeln!(out, "static map_type get_stl_unordered_map_{name}()")?;
    writeln!(out, "{{")?;
    writeln!(out, "  map_type map;")?;
    writeln!(out)?;
    for (key, value) in corpus.iter() {
        writeln!(out, "  map[{}] = {value}u;", cstr_literal(key))?;
    }
    writeln!(out)?;
    writeln!(out, "  return map;")?;
    writeln!(out, "}}")?;
    writeln!(out)?;
    writeln!(out, "static map_type stl_map = get_stl_unordered_map_{name}();")?;
    writeln!(out, "#endif")?;
    writeln!(out)
}

fn write_lookup_wrappers<W: Write>(out: &mut W, name: &str) -> io::Result<()> {
    writeln!(out, "#ifdef PRE")?;
    writeln!(out, "uint64_t {name}_lookup_prefix(const char * key)")?;
    writeln!(out, "{{")?;
    writeln!(out, "  auto search = {name}::lookup(key);")?;
    writeln!(out, "  if (search == {name}::end())")?;
    writeln!(out, "  {{")?;
    writeln!(out, "    return std::numeric_limits<uint64_t>::max();")?;
    writeln!(out, "  }}")?;
    writeln!(out, "  return *search;")?;
    writeln!(out, "}}")?;
    writeln!(out, "#endif")?;
    writeln!(out, "#ifdef STL")?;
    writeln!(out, "uint64_t {name}_lookup_stl(const char * str)")?;
    writeln!(out, "{{")?;
    writeln!(out, "  auto search = stl_map.find(str);")?;
    writeln!(out, "  if (search == stl_map.end())")?;
    writeln!(out, "  {{")?;
    writeln!(out, "    return std::numeric_limits<uint64_t>::max();")?;
    writeln!(out, "  }}")?;
    writeln!(out, "  return search->second;")?;
    writeln!(out, "}}")?;
    writeln!(out, "#endif")?;
    writeln!(out)
}

fn write_sanity_check<W: Write>(
    out: &mut W,
    name: &str,
    fixture: &LookupFixture,
) -> io::Result<()> {
    writeln!(out, "// Correctness sanity check")?;
    writeln!(out, "void {name}_sanity()")?;
    writeln!(out, "{{")?;
    for (key, value) in fixture.corpus.iter() {
        write_sanity_probe(out, name, key, value, "Present")?;
    }
    for key in &fixture.clean_misses {
        write_sanity_probe(out, name, key, NOT_FOUND, "Absent")?;
    }
    writeln!(out, "}}")?;
    writeln!(out)
}

fn write_sanity_probe<W: Write>(
    out: &mut W,
    name: &str,
    key: &[u8],
    expected: u64,
    note: &str,
) -> io::Result<()> {
    writeln!(out, "  {{")?;
    writeln!(out, "    const char * key = {}; // {note}", cstr_literal(key))?;
    writeln!(out, "#ifdef PRE")?;
    writeln!(out, "    assert({expected}u == {name}_lookup_prefix(key));")?;
    writeln!(out, "#endif")?;
    writeln!(out, "#ifdef STL")?;
    writeln!(out, "    assert({expected}u == {name}_lookup_stl(key));")?;
    writeln!(out, "#endif")?;
    writeln!(out, "  }}")
}

fn write_bench_loops<W: Write>(
    out: &mut W,
    name: &str,
    fixture: &LookupFixture,
) -> io::Result<()> {
    writeln!(out, "#ifdef PRE")?;
    write_lookup_loop(out, name, "successful", "prefix", &fixture.corpus.keys)?;
    write_lookup_loop(out, name, "failing", "prefix", &fixture.clean_misses)?;
    writeln!(out, "#endif //PRE")?;
    writeln!(out, "#ifdef STL")?;
    write_lookup_loop(out, name, "successful", "stl", &fixture.corpus.keys)?;
    write_lookup_loop(out, name, "failing", "stl", &fixture.clean_misses)?;
    writeln!(out, "#endif //STL")
}

fn write_lookup_loop<W: Write>(
    out: &mut W,
    name: &str,
    tag: &str,
    backend: &str,
    keys: &[Key],
) -> io::Result<()> {
    writeln!(out, "void {name}_lookup_every_{tag}_{backend}()")?;
    writeln!(out, "{{")?;
    for key in keys {
        writeln!(
            out,
            "  value_sink({name}_lookup_{backend}({}));",
            cstr_literal(key)
        )?;
    }
    writeln!(out, "}}")?;
    writeln!(out)
}
