/// Modules the runtime prelude loads, in load order. The renderer module is
/// optional; the prelude falls back to a built-in renderer without it.
pub const RUNTIME_IMPORTS: &[&str] = &["fs", "path", "./gui-renderer"];

/// The JavaScript runtime every generated program runs on.
///
/// It defines the value representation (`NixiValue`), the operator and call
/// semantics (`rt`), the built-in table (`builtins`) and the presentation
/// renderer. Error messages are formatted exactly like the evaluator's
/// `RuntimeError` display, so both backends report failures identically.
pub const RUNTIME: &str = r##"'use strict';
// nixi runtime
const fs = require('fs');
const path = require('path');

class NixiError extends Error {
  constructor(line, message) {
    super(`Error on line ${line}: ${message}`);
    this.name = 'NixiError';
    this.line = line;
  }
}

function formatNumber(n) {
  return String(n);
}

class NixiValue {
  constructor(type, value) {
    this.type = type;
    this.value = value;
  }

  static fromNative(value) {
    if (value === null || value === undefined) return NULL;
    if (value instanceof NixiValue) return value;
    if (typeof value === 'boolean') return new NixiValue('boolean', value);
    if (typeof value === 'number') return new NixiValue('number', value);
    if (typeof value === 'string') return new NixiValue('string', value);
    if (Array.isArray(value)) return new NixiValue('array', value.map(NixiValue.fromNative));
    if (typeof value === 'object') {
      const record = new Map();
      for (const [key, item] of Object.entries(value)) {
        record.set(key, NixiValue.fromNative(item));
      }
      return new NixiValue('record', record);
    }
    return new NixiValue('string', String(value));
  }

  toNative() {
    switch (this.type) {
      case 'array':
        return this.value.map((item) => item.toNative());
      case 'record': {
        const object = {};
        for (const [key, item] of this.value) object[key] = item.toNative();
        return object;
      }
      default:
        return this.value;
    }
  }

  nativeString() {
    switch (this.type) {
      case 'null':
        return 'null';
      case 'boolean':
        return String(this.value);
      case 'number':
        return formatNumber(this.value);
      case 'string':
        return this.value;
      case 'array':
        return this.value.map((item) => item.nativeString()).join(',');
      default:
        return this.toString();
    }
  }

  toString() {
    switch (this.type) {
      case 'string':
        return JSON.stringify(this.value);
      case 'array':
        return '[' + this.value.map((item) => item.toString()).join(', ') + ']';
      case 'record': {
        if (this.value.size === 0) return '{}';
        const entries = [...this.value].map(([key, item]) => key + ' = ' + item.toString());
        return '{ ' + entries.join(', ') + ' }';
      }
      case 'function':
        return '<function>';
      default:
        return this.nativeString();
    }
  }
}

const NULL = new NixiValue('null', null);

function kindName(value) {
  return value.type;
}

function truthy(value) {
  switch (value.type) {
    case 'null':
      return false;
    case 'boolean':
      return value.value;
    case 'number':
      return value.value !== 0 && !Number.isNaN(value.value);
    case 'string':
      return value.value !== '';
    default:
      return true;
  }
}

function equal(a, b) {
  if (a.type !== b.type) return false;
  switch (a.type) {
    case 'null':
      return true;
    case 'array':
      return a.value.length === b.value.length && a.value.every((item, i) => equal(item, b.value[i]));
    case 'record':
      return a.value.size === b.value.size &&
        [...a.value].every(([key, item]) => b.value.has(key) && equal(item, b.value.get(key)));
    default:
      return a.value === b.value;
  }
}

function typeError(details, line) {
  return new NixiError(line, `Type error: ${details}.`);
}

function argumentCount(name, expected, found, line) {
  return new NixiError(line, `'${name}' expects ${expected} argument(s), got ${found}.`);
}

function ioError(operation, error, line) {
  return new NixiError(line, `${operation} failed: ${error.message}.`);
}

function invalidOperands(op, l, r, line) {
  return typeError(`invalid operands for ${op}: ${kindName(l)} and ${kindName(r)}`, line);
}

function expectStr(value, context, line) {
  if (value.type !== 'string') {
    throw typeError(`${context} expects a string, got ${kindName(value)}`, line);
  }
  return value.value;
}

function escapeText(text) {
  return text.replace(/&/g, '&amp;').replace(/</g, '&lt;').replace(/>/g, '&gt;');
}

function escapeAttribute(text) {
  return escapeText(text).replace(/"/g, '&quot;');
}

function renderNode(value) {
  switch (value.type) {
    case 'string':
      return value.value;
    case 'array':
      return value.value.map(renderNode).join('');
    case 'record': {
      const kind = value.value.get('type');
      if (kind === undefined || kind.type !== 'string') return escapeText(value.nativeString());
      let out = '<' + kind.value;
      let content = '';
      const props = value.value.get('props');
      if (props !== undefined && props.type === 'record') {
        for (const [key, prop] of props.value) {
          if (key === 'children') {
            content += renderNode(prop);
          } else if (key === 'text') {
            content += escapeText(prop.nativeString());
          } else if (prop.type === 'boolean' && prop.value) {
            out += ' ' + key;
          } else if (prop.type === 'boolean' || prop.type === 'null' || prop.type === 'function') {
            continue;
          } else {
            out += ' ' + key + '="' + escapeAttribute(prop.nativeString()) + '"';
          }
        }
      }
      return out + '>' + content + '</' + kind.value + '>';
    }
    default:
      return escapeText(value.nativeString());
  }
}

class FallbackRenderer {
  constructor() {
    this.rules = [];
  }

  addStyle(selector, properties) {
    const body = properties.map(([name, value]) => '  ' + name + ': ' + value + ';\n').join('');
    this.rules.push(selector + ' {\n' + body + '}');
  }

  addCSS(rule) {
    this.rules.push(rule);
  }

  generateHTML(value, title) {
    let page = '<!DOCTYPE html>\n<html>\n<head>\n';
    page += '  <meta charset="UTF-8">\n';
    page += '  <meta name="viewport" content="width=device-width, initial-scale=1.0">\n';
    page += '  <title>' + escapeText(title) + '</title>\n';
    if (this.rules.length > 0) {
      page += '  <style>\n' + this.rules.map((rule) => rule + '\n').join('') + '  </style>\n';
    }
    page += '</head>\n<body>\n' + renderNode(value) + '\n</body>\n</html>\n';
    return page;
  }

  saveToFile(text, filename) {
    fs.writeFileSync(path.resolve(filename), text);
  }
}

let guiRenderer = null;
function renderer() {
  if (guiRenderer === null) {
    let Renderer = FallbackRenderer;
    try {
      Renderer = require('./gui-renderer');
    } catch (error) {
      Renderer = FallbackRenderer;
    }
    guiRenderer = new Renderer();
  }
  return guiRenderer;
}

function closure(name, kind, names, body) {
  return new NixiValue('function', { name, kind, names, body });
}

function builtin(name, accepts, expected, body) {
  return new NixiValue('function', { name, kind: 'builtin', accepts, expected, body });
}

function element(kind, args) {
  const props = args.length > 0 ? args[0] : new NixiValue('record', new Map());
  return rt.rec([['type', rt.str(kind)], ['props', props]]);
}

const rt = {
  globals: new Map(),
  components: new Map(),

  num: (n) => new NixiValue('number', n),
  str: (s) => new NixiValue('string', s),
  bool: (b) => new NixiValue('boolean', b),
  nil: () => NULL,
  arr: (items) => new NixiValue('array', items),
  rec: (entries) => new NixiValue('record', new Map(entries)),
  truthy,

  lookup(name, line) {
    if (rt.components.has(name)) return rt.components.get(name);
    if (rt.globals.has(name)) return rt.globals.get(name);
    throw new NixiError(line, `Unknown variable '${name}'.`);
  },

  local(name, value) {
    return rt.components.has(name) ? rt.components.get(name) : value;
  },

  assign(name, value) {
    rt.globals.set(name, value);
    return value;
  },

  component(name, kind, names, body) {
    const value = closure(name, kind, names, body);
    rt.components.set(name, value);
    return value;
  },

  closure,

  binary(op, l, r, line) {
    switch (op) {
      case '+':
        if (l.type === 'number' && r.type === 'number') return rt.num(l.value + r.value);
        if (l.type === 'string' || r.type === 'string') return rt.str(l.nativeString() + r.nativeString());
        throw invalidOperands(op, l, r, line);
      case '-':
      case '*':
      case '/':
        if (l.type !== 'number' || r.type !== 'number') throw invalidOperands(op, l, r, line);
        if (op === '-') return rt.num(l.value - r.value);
        if (op === '*') return rt.num(l.value * r.value);
        return rt.num(l.value / r.value);
      case '==':
        return rt.bool(equal(l, r));
      case '!=':
        return rt.bool(!equal(l, r));
      case '<':
      case '<=':
      case '>':
      case '>=':
        if (l.type !== 'number' || r.type !== 'number') throw invalidOperands(op, l, r, line);
        if (op === '<') return rt.bool(l.value < r.value);
        if (op === '<=') return rt.bool(l.value <= r.value);
        if (op === '>') return rt.bool(l.value > r.value);
        return rt.bool(l.value >= r.value);
      case '&&':
        return rt.bool(truthy(l) && truthy(r));
      case '||':
        return rt.bool(truthy(l) || truthy(r));
      default:
        throw new NixiError(line, 'Invalid assignment target.');
    }
  },

  negate(value, line) {
    if (value.type !== 'number') {
      throw typeError(`unary - expects a number, got ${kindName(value)}`, line);
    }
    return rt.num(-value.value);
  },

  not: (value) => rt.bool(!truthy(value)),

  prop(object, name, line) {
    if (object.type !== 'record') {
      throw typeError(`cannot read property '${name}' of ${kindName(object)}`, line);
    }
    return object.value.has(name) ? object.value.get(name) : NULL;
  },

  call(f, args, line) {
    if (f.type !== 'function') {
      throw new NixiError(line, `Value of kind ${kindName(f)} is not callable.`);
    }
    const fn = f.value;
    if (fn.kind === 'builtin') {
      if (!fn.accepts(args.length)) throw argumentCount(fn.name, fn.expected, args.length, line);
      return fn.body(args, line);
    }
    const name = fn.name === null ? '<lambda>' : fn.name;
    if (fn.kind === 'named') {
      if (args.length !== 1) throw argumentCount(name, '1', args.length, line);
      if (args[0].type !== 'record') {
        throw typeError(`${name} expects a record argument, got ${kindName(args[0])}`, line);
      }
      return fn.body(...fn.names.map((param) => (args[0].value.has(param) ? args[0].value.get(param) : NULL)));
    }
    const count = fn.names.length;
    const result = fn.body(...fn.names.map((_, i) => (i < args.length ? args[i] : NULL)));
    const rest = args.slice(count);
    if (rest.length === 0) return result;
    if (result.type === 'function') return rt.call(result, rest, line);
    throw argumentCount(name, String(count), count + rest.length, line);
  },

  instantiate(f, props, line) {
    if (f.type === 'function' && props.type === 'record') {
      const fn = f.value;
      if (fn.kind === 'positional' && fn.names.length > 0 && fn.names.every((param) => props.value.has(param))) {
        return rt.call(f, fn.names.map((param) => props.value.get(param)), line);
      }
    }
    return rt.call(f, [props], line);
  },

  markup(open, children, close) {
    return rt.str(open + children.map((child) => child.nativeString()).join('') + close);
  },

  addStyle(selector, properties) {
    renderer().addStyle(selector, properties);
    return NULL;
  },

  addCSS(rules) {
    for (const rule of rules) renderer().addCSS(rule);
    return NULL;
  },
};

const exactly = (n) => (count) => count === n;
const zeroOrOne = (count) => count === 0 || count === 1;

const builtins = {
  add: builtin('add', exactly(2), '2', ([a, b], line) => rt.binary('+', a, b, line)),
  subtract: builtin('subtract', exactly(2), '2', ([a, b], line) => rt.binary('-', a, b, line)),
  multiply: builtin('multiply', exactly(2), '2', ([a, b], line) => rt.binary('*', a, b, line)),
  divide: builtin('divide', exactly(2), '2', ([a, b], line) => rt.binary('/', a, b, line)),
  echo: builtin('echo', () => true, 'at least 0', (args) => {
    console.log(args.map((arg) => arg.nativeString()).join(' '));
    return NULL;
  }),
  concat: builtin('concat', exactly(2), '2', ([a, b]) => rt.str(a.nativeString() + b.nativeString())),
  toString: builtin('toString', exactly(1), '1', ([value]) => rt.str(value.nativeString())),
  map: builtin('map', exactly(2), '2', ([f, list], line) => {
    if (list.type !== 'array') {
      throw typeError(`map expects an array as second argument, got ${kindName(list)}`, line);
    }
    if (f.type !== 'function') {
      throw typeError(`map expects a function as first argument, got ${kindName(f)}`, line);
    }
    return rt.arr(list.value.map((item) => rt.call(f, [item], line)));
  }),
  length: builtin('length', exactly(1), '1', ([value], line) => {
    if (value.type === 'array') return rt.num(value.value.length);
    if (value.type === 'string') return rt.num([...value.value].length);
    throw typeError(`length expects an array or a string, got ${kindName(value)}`, line);
  }),
  ls: builtin('ls', zeroOrOne, '0 or 1', (args, line) => {
    const dir = args.length === 0 || args[0].type === 'null' ? '.' : expectStr(args[0], 'ls', line);
    try {
      return rt.arr(fs.readdirSync(dir).sort().map(rt.str));
    } catch (error) {
      throw ioError('ls', error, line);
    }
  }),
  cd: builtin('cd', exactly(1), '1', ([dir], line) => {
    const target = expectStr(dir, 'cd', line);
    try {
      process.chdir(target);
    } catch (error) {
      throw ioError('cd', error, line);
    }
    return NULL;
  }),
  pwd: builtin('pwd', exactly(0), '0', () => rt.str(process.cwd())),
  div: builtin('div', zeroOrOne, '0 or 1', (args) => element('div', args)),
  span: builtin('span', zeroOrOne, '0 or 1', (args) => element('span', args)),
  button: builtin('button', zeroOrOne, '0 or 1', (args) => element('button', args)),
  input: builtin('input', zeroOrOne, '0 or 1', (args) => element('input', args)),
  h1: builtin('h1', zeroOrOne, '0 or 1', (args) => element('h1', args)),
  h2: builtin('h2', zeroOrOne, '0 or 1', (args) => element('h2', args)),
  h3: builtin('h3', zeroOrOne, '0 or 1', (args) => element('h3', args)),
  p: builtin('p', zeroOrOne, '0 or 1', (args) => element('p', args)),
  a: builtin('a', zeroOrOne, '0 or 1', (args) => element('a', args)),
  renderHTML: builtin('renderHTML', exactly(2), '2', ([component, title], line) =>
    rt.str(renderer().generateHTML(component, expectStr(title, 'renderHTML', line)))),
  saveHTML: builtin('saveHTML', exactly(3), '3', ([component, filename, title], line) => {
    const target = expectStr(filename, 'saveHTML', line);
    const page = renderer().generateHTML(component, expectStr(title, 'saveHTML', line));
    try {
      renderer().saveToFile(page, target);
    } catch (error) {
      throw ioError('saveHTML', error, line);
    }
    return NULL;
  }),
  addStyle: builtin('addStyle', exactly(2), '2', ([selector, properties], line) => {
    const target = expectStr(selector, 'addStyle', line);
    if (properties.type !== 'record') {
      throw typeError(`addStyle expects a record of properties, got ${kindName(properties)}`, line);
    }
    return rt.addStyle(target, [...properties.value].map(([name, value]) => [name, value.nativeString()]));
  }),
};

"##;
